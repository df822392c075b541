//! Logical → native type mapping
//!
//! Each provider owns one static [`TypeMap`]: a literal table from logical
//! type to [`NativeType`], plus the form used for unrecognised types. The
//! sizing policy lives here so every dialect applies it identically:
//!
//! - text: `Length` absent or `< 1` means the dialect maximum, and a length
//!   at or above the maximum emits the unbounded form
//! - decimal: `Precision` absent or `< 1` means the dialect maximum and is
//!   clamped to it; the scale is read from `Length` and clamped to
//!   `0..=precision`

use ddlforge_core::LogicalType;
use ddlforge_metadata::FieldMetadata;

/// Native column type shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeType {
    /// Fixed spelling, no size arguments
    Plain(&'static str),

    /// Variable-length text with a capped and an unbounded form
    VarText {
        capped: &'static str,
        unbounded: &'static str,
        max_length: i32,
    },

    /// Fixed-point number taking `(precision,scale)`
    Numeric {
        name: &'static str,
        max_precision: i32,
    },
}

/// Data-driven mapping table for one dialect
#[derive(Debug)]
pub struct TypeMap {
    entries: &'static [(LogicalType, NativeType)],
    fallback: NativeType,
}

impl TypeMap {
    /// Build a map from its entries and the unrecognised-type fallback
    pub const fn new(entries: &'static [(LogicalType, NativeType)], fallback: NativeType) -> Self {
        Self { entries, fallback }
    }

    /// Native shape for a logical type; unknown types get the fallback
    pub fn lookup(&self, logical_type: &LogicalType) -> NativeType {
        self.entries
            .iter()
            .find(|(ty, _)| ty == logical_type)
            .map(|(_, native)| *native)
            .unwrap_or(self.fallback)
    }

    /// All mapped logical types, in table order
    pub fn logical_types(&self) -> impl Iterator<Item = &LogicalType> {
        self.entries.iter().map(|(ty, _)| ty)
    }

    /// Render the native type for a field, sizes included
    pub fn render(&self, field: &FieldMetadata) -> String {
        if !field.logical_type.is_known() {
            tracing::debug!(
                field = %field.name,
                logical_type = %field.logical_type,
                "unrecognised logical type, falling back to unbounded text"
            );
        }

        match self.lookup(&field.logical_type) {
            NativeType::Plain(name) => name.to_string(),
            NativeType::VarText {
                capped,
                unbounded,
                max_length,
            } => {
                let length = text_length(field.length, max_length);
                if length >= max_length {
                    unbounded.to_string()
                } else {
                    format!("{}({})", capped, length)
                }
            }
            NativeType::Numeric {
                name,
                max_precision,
            } => {
                let (precision, scale) = precision_and_scale(field, max_precision);
                format!("{}({},{})", name, precision, scale)
            }
        }
    }
}

/// Effective text length: absent or `< 1` means the maximum
fn text_length(length: Option<i32>, max_length: i32) -> i32 {
    length.filter(|l| *l >= 1).unwrap_or(max_length)
}

/// Effective `(precision, scale)`; the scale comes from `Length`
fn precision_and_scale(field: &FieldMetadata, max_precision: i32) -> (i32, i32) {
    let precision = field
        .precision
        .filter(|p| *p >= 1)
        .map_or(max_precision, |p| p.min(max_precision));
    let scale = field.length.unwrap_or(0).clamp(0, precision);
    (precision, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE_ENTRIES: [(LogicalType, NativeType); 3] = [
        (
            LogicalType::String,
            NativeType::VarText {
                capped: "VARCHAR",
                unbounded: "TEXT",
                max_length: 100,
            },
        ),
        (
            LogicalType::Decimal,
            NativeType::Numeric {
                name: "NUMERIC",
                max_precision: 20,
            },
        ),
        (LogicalType::Int, NativeType::Plain("INTEGER")),
    ];

    static SAMPLE: TypeMap = TypeMap::new(&SAMPLE_ENTRIES, NativeType::Plain("TEXT"));

    #[test]
    fn test_text_capped_below_maximum() {
        let field = FieldMetadata::new("Code", "string").with_length(50);
        assert_eq!(SAMPLE.render(&field), "VARCHAR(50)");
        let field = FieldMetadata::new("Code", "string").with_length(99);
        assert_eq!(SAMPLE.render(&field), "VARCHAR(99)");
    }

    #[test]
    fn test_text_unbounded_at_or_above_maximum() {
        for length in [100, 250] {
            let field = FieldMetadata::new("Body", "string").with_length(length);
            assert_eq!(SAMPLE.render(&field), "TEXT");
        }
    }

    #[test]
    fn test_text_missing_or_invalid_length_is_unbounded() {
        assert_eq!(SAMPLE.render(&FieldMetadata::new("Body", "string")), "TEXT");
        for length in [0, -5] {
            let field = FieldMetadata::new("Body", "string").with_length(length);
            assert_eq!(SAMPLE.render(&field), "TEXT");
        }
    }

    #[test]
    fn test_decimal_defaults_and_clamps() {
        let field = FieldMetadata::new("Total", "decimal");
        assert_eq!(SAMPLE.render(&field), "NUMERIC(20,0)");

        let field = FieldMetadata::new("Total", "decimal").with_precision(50);
        assert_eq!(SAMPLE.render(&field), "NUMERIC(20,0)");

        let field = FieldMetadata::new("Total", "decimal")
            .with_precision(4)
            .with_length(9);
        assert_eq!(SAMPLE.render(&field), "NUMERIC(4,4)");

        let field = FieldMetadata::new("Total", "decimal")
            .with_precision(0)
            .with_length(-1);
        assert_eq!(SAMPLE.render(&field), "NUMERIC(20,0)");
    }

    #[test]
    fn test_unknown_type_uses_fallback() {
        let field = FieldMetadata::new("Price", "money").with_length(10);
        assert_eq!(SAMPLE.render(&field), "TEXT");
        assert_eq!(SAMPLE.lookup(&LogicalType::Guid), NativeType::Plain("TEXT"));
    }

    #[test]
    fn test_logical_types_in_table_order() {
        let types: Vec<&LogicalType> = SAMPLE.logical_types().collect();
        assert_eq!(
            types,
            vec![&LogicalType::String, &LogicalType::Decimal, &LogicalType::Int]
        );
    }
}
