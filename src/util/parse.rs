use crate::{error::internal::InternalError, model::snowflake::Snowflake};

/// Parses a snowflake from its decimal string form
///
/// # Arguments
/// - `value` - The string to attempt to parse into a `Snowflake`
///
/// # Returns
/// - `Ok(Some(Snowflake))` - Successfully parsed a non-zero id
/// - `Ok(None)` - The string is a valid integer but zero, which no entity can carry
/// - `Err(InternalError::ParseSnowflake)` - The string is not an unsigned 64-bit integer
pub fn parse_snowflake(value: &str) -> Result<Option<Snowflake>, InternalError> {
    let raw = value
        .trim()
        .parse::<u64>()
        .map_err(|e| InternalError::ParseSnowflake {
            value: value.to_string(),
            source: e,
        })?;

    Ok(Snowflake::new(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_ids() {
        let id = parse_snowflake("80351110224678912").unwrap().unwrap();
        assert_eq!(id.get(), 80351110224678912);
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(parse_snowflake("0").unwrap(), None);
    }

    #[test]
    fn rejects_non_numeric() {
        let err = parse_snowflake("general").unwrap_err();
        assert!(matches!(err, InternalError::ParseSnowflake { value, .. } if value == "general"));
    }

    #[test]
    fn rejects_negative() {
        assert!(parse_snowflake("-5").is_err());
    }
}
