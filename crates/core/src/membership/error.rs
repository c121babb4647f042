use thiserror::Error;

/// Errors that can occur when validating membership input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MembershipError {
    #[error("Member name cannot be empty")]
    EmptyName,
    #[error("Member phone cannot be empty")]
    EmptyPhone,
    #[error("Member address cannot be empty")]
    EmptyAddress,
    #[error("Amount must be a positive number, got {0}")]
    InvalidAmount(f64),
    #[error("Member ID is required")]
    MissingMemberId,
    #[error("Collector name cannot be empty")]
    EmptyCollector,
    #[error("Reminder message cannot be empty")]
    EmptyMessage,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amount_display() {
        let error = MembershipError::InvalidAmount(-5.0);
        assert_eq!(error.to_string(), "Amount must be a positive number, got -5");
    }

    #[test]
    fn test_invalid_date_display() {
        let error = MembershipError::InvalidDate("Unparseable date: soon".to_string());
        assert_eq!(error.to_string(), "Invalid date: Unparseable date: soon");
    }
}
