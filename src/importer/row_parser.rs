use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What to do with a row whose price or quantity does not parse. The original
/// system silently coerced to zero; rejecting is the safer default, with the
/// permissive mode kept for compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidNumericPolicy {
    RejectRow,
    DefaultZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    TooFewFields,
    InvalidNumeric,
}

/// Candidate record produced from one data line. Lives only for the duration
/// of a single import call.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRecord {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Record(ImportRecord),
    /// Dropped and reported to the caller.
    Skip(SkipReason),
    /// Whitespace-only line; dropped without reporting.
    Blank,
}

/// Splits one delimited line into an `ImportRecord`. Stateless per line;
/// header handling is the pipeline's job. Never fails hard: malformed content
/// only ever yields a skip outcome.
#[derive(Debug, Clone, Copy)]
pub struct RowParser {
    policy: InvalidNumericPolicy,
}

impl RowParser {
    pub fn new(policy: InvalidNumericPolicy) -> Self {
        Self { policy }
    }

    pub fn parse_line(&self, line: &str) -> RowOutcome {
        if line.trim().is_empty() {
            return RowOutcome::Blank;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 4 {
            return RowOutcome::Skip(SkipReason::TooFewFields);
        }

        let name = fields[0].trim().to_string();
        let category_name = fields[3].trim().to_string();
        let description = fields
            .get(4)
            .map(|d| d.trim().to_string())
            .unwrap_or_default();

        // Negative values are invalid input, same as parse failures; the
        // products table only holds non-negative prices and quantities.
        let price = match fields[1].trim().parse::<Decimal>() {
            Ok(price) if !price.is_sign_negative() => price,
            _ => match self.policy {
                InvalidNumericPolicy::DefaultZero => Decimal::ZERO,
                InvalidNumericPolicy::RejectRow => {
                    return RowOutcome::Skip(SkipReason::InvalidNumeric);
                }
            },
        };

        let quantity = match fields[2].trim().parse::<i32>() {
            Ok(quantity) if quantity >= 0 => quantity,
            _ => match self.policy {
                InvalidNumericPolicy::DefaultZero => 0,
                InvalidNumericPolicy::RejectRow => {
                    return RowOutcome::Skip(SkipReason::InvalidNumeric);
                }
            },
        };

        RowOutcome::Record(ImportRecord {
            name,
            price,
            quantity,
            category_name,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(policy: InvalidNumericPolicy) -> RowParser {
        RowParser::new(policy)
    }

    #[test]
    fn well_formed_row_parses() {
        let outcome =
            parser(InvalidNumericPolicy::RejectRow).parse_line("Widget,9.99,10,Tools,A widget");

        let RowOutcome::Record(record) = outcome else {
            panic!("expected a record, got {outcome:?}");
        };
        assert_eq!(record.name, "Widget");
        assert_eq!(record.price, Decimal::new(999, 2));
        assert_eq!(record.quantity, 10);
        assert_eq!(record.category_name, "Tools");
        assert_eq!(record.description, "A widget");
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let outcome = parser(InvalidNumericPolicy::RejectRow).parse_line("Gadget,19.99,0,Tools");

        let RowOutcome::Record(record) = outcome else {
            panic!("expected a record, got {outcome:?}");
        };
        assert_eq!(record.quantity, 0);
        assert_eq!(record.description, "");
    }

    #[test]
    fn fields_are_trimmed() {
        let outcome =
            parser(InvalidNumericPolicy::RejectRow).parse_line(" Widget , 9.99 , 10 , Tools ");

        let RowOutcome::Record(record) = outcome else {
            panic!("expected a record, got {outcome:?}");
        };
        assert_eq!(record.name, "Widget");
        assert_eq!(record.category_name, "Tools");
    }

    #[test]
    fn blank_line_is_silent() {
        assert_eq!(
            parser(InvalidNumericPolicy::RejectRow).parse_line("   \t  "),
            RowOutcome::Blank
        );
    }

    #[test]
    fn too_few_fields_is_skipped() {
        assert_eq!(
            parser(InvalidNumericPolicy::RejectRow).parse_line("BadRow,5"),
            RowOutcome::Skip(SkipReason::TooFewFields)
        );
    }

    #[test]
    fn bad_price_rejected_under_reject_policy() {
        assert_eq!(
            parser(InvalidNumericPolicy::RejectRow).parse_line("Widget,abc,10,Tools"),
            RowOutcome::Skip(SkipReason::InvalidNumeric)
        );
    }

    #[test]
    fn bad_quantity_rejected_under_reject_policy() {
        assert_eq!(
            parser(InvalidNumericPolicy::RejectRow).parse_line("Widget,9.99,many,Tools"),
            RowOutcome::Skip(SkipReason::InvalidNumeric)
        );
    }

    #[test]
    fn negative_price_rejected_under_reject_policy() {
        assert_eq!(
            parser(InvalidNumericPolicy::RejectRow).parse_line("Widget,-1.00,10,Tools"),
            RowOutcome::Skip(SkipReason::InvalidNumeric)
        );
    }

    #[test]
    fn negative_quantity_rejected_under_reject_policy() {
        assert_eq!(
            parser(InvalidNumericPolicy::RejectRow).parse_line("Widget,9.99,-5,Tools"),
            RowOutcome::Skip(SkipReason::InvalidNumeric)
        );
    }

    #[test]
    fn negative_numerics_default_to_zero_under_compat_policy() {
        let outcome =
            parser(InvalidNumericPolicy::DefaultZero).parse_line("Widget,-1.00,-5,Tools");

        let RowOutcome::Record(record) = outcome else {
            panic!("expected a record, got {outcome:?}");
        };
        assert_eq!(record.price, Decimal::ZERO);
        assert_eq!(record.quantity, 0);
    }

    #[test]
    fn bad_numerics_default_to_zero_under_compat_policy() {
        let outcome =
            parser(InvalidNumericPolicy::DefaultZero).parse_line("Widget,abc,many,Tools");

        let RowOutcome::Record(record) = outcome else {
            panic!("expected a record, got {outcome:?}");
        };
        assert_eq!(record.price, Decimal::ZERO);
        assert_eq!(record.quantity, 0);
    }
}
