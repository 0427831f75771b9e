//! Errors from the Journey Service facade.

use crate::domain::SettlementCode;
use crate::search::SearchError;

#[derive(Debug, thiserror::Error)]
pub enum JourneyError {
    #[error("no such settlement: {0}")]
    UnknownSettlement(SettlementCode),

    #[error("settlement {0} has no stations")]
    EmptySettlement(SettlementCode),

    #[error(transparent)]
    Search(#[from] SearchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let code = SettlementCode::parse("c1").unwrap();
        assert_eq!(
            JourneyError::UnknownSettlement(code.clone()).to_string(),
            "no such settlement: c1"
        );
        assert_eq!(
            JourneyError::EmptySettlement(code).to_string(),
            "settlement c1 has no stations"
        );
    }
}
