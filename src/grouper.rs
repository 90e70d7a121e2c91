//! Grouping of typed spans into ingredient records.
//!
//! Spans are consumed in reading order. Attributes seen before any ingredient
//! name accumulate in a pending slot and seed the next record; within a record
//! the first writer wins for each of quantity, unit, and form.

use log::debug;

use crate::model::{EntityLabel, EntitySpan, IngredientRecord, QuantityValue};
use crate::quantity::parse_quantity_lenient;
use crate::units::normalize_unit;

/// Attributes collected before an INGREDIENT span is seen.
#[derive(Debug, Default)]
struct PendingAttributes {
    quantity: Option<QuantityValue>,
    unit: Option<String>,
    form: Option<String>,
}

/// Group sorted entity spans into ordered ingredient records.
///
/// Records without a name are discarded on flush, so the output lines up one
/// to one with the INGREDIENT spans of the input.
pub fn group_ingredients(spans: &[EntitySpan]) -> Vec<IngredientRecord> {
    if spans.is_empty() {
        return Vec::new();
    }
    // upstream already sorts, re-sort defensively
    let mut ordered: Vec<&EntitySpan> = spans.iter().collect();
    ordered.sort_by_key(|span| span.start);

    let mut records: Vec<IngredientRecord> = Vec::new();
    let mut current: Option<IngredientRecord> = None;
    let mut pending = PendingAttributes::default();

    for span in ordered {
        let value = span.text.trim();
        if value.is_empty() {
            continue;
        }
        match span.label {
            EntityLabel::Ingredient => {
                flush(&mut records, &mut current);
                let mut record = IngredientRecord::named(value);
                record.quantity = pending.quantity.take();
                record.unit = pending.unit.take();
                record.form = pending.form.take();
                current = Some(record);
            }
            EntityLabel::Qty => {
                let (quantity, unit_hint) = parse_quantity_lenient(value);
                match current.as_mut() {
                    Some(record) if record.quantity.is_none() => {
                        record.quantity = quantity;
                        if record.unit.is_none() {
                            if let Some(hint) = unit_hint {
                                record.unit = Some(hint);
                            }
                        }
                    }
                    _ => {
                        pending.quantity = quantity;
                        if pending.unit.is_none() {
                            if let Some(hint) = unit_hint {
                                pending.unit = Some(hint);
                            }
                        }
                    }
                }
            }
            EntityLabel::Unit => {
                let unit = normalize_unit(value);
                match current.as_mut() {
                    Some(record) if record.unit.is_none() => record.unit = Some(unit),
                    _ => pending.unit = Some(unit),
                }
            }
            EntityLabel::Form => match current.as_mut() {
                Some(record) if record.form.is_none() => record.form = Some(value.to_string()),
                _ => pending.form = Some(value.to_string()),
            },
        }
    }

    flush(&mut records, &mut current);
    debug!("grouped {} spans into {} records", spans.len(), records.len());
    records
}

fn flush(records: &mut Vec<IngredientRecord>, current: &mut Option<IngredientRecord>) {
    if let Some(record) = current.take() {
        if !record.name.is_empty() {
            records.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(label: EntityLabel, start: usize, text: &str) -> EntitySpan {
        EntitySpan {
            label,
            start,
            end: start + text.len(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_attributes_before_name_seed_the_record() {
        let spans = vec![
            span(EntityLabel::Qty, 0, "2"),
            span(EntityLabel::Unit, 2, "cups"),
            span(EntityLabel::Ingredient, 7, "flour"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "flour");
        assert_eq!(records[0].quantity, Some(QuantityValue::Number(2.0)));
        assert_eq!(records[0].unit.as_deref(), Some("cups"));
    }

    #[test]
    fn test_attributes_after_name_fill_the_open_record() {
        let spans = vec![
            span(EntityLabel::Ingredient, 0, "penne"),
            span(EntityLabel::Qty, 6, "200"),
            span(EntityLabel::Unit, 10, "g"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity, Some(QuantityValue::Number(200.0)));
        assert_eq!(records[0].unit.as_deref(), Some("g"));
    }

    #[test]
    fn test_first_writer_wins_for_quantity() {
        // trailing QTY arrives after the record closed its slot via pending;
        // it starts a nameless pending set that is discarded
        let spans = vec![
            span(EntityLabel::Qty, 0, "2"),
            span(EntityLabel::Unit, 2, "cups"),
            span(EntityLabel::Ingredient, 7, "flour"),
            span(EntityLabel::Qty, 13, "3"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity, Some(QuantityValue::Number(2.0)));
        assert_eq!(records[0].unit.as_deref(), Some("cups"));
        assert_eq!(records[0].name, "flour");
    }

    #[test]
    fn test_second_unit_ignored() {
        let spans = vec![
            span(EntityLabel::Ingredient, 0, "sugar"),
            span(EntityLabel::Unit, 6, "cups"),
            span(EntityLabel::Unit, 11, "g"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(records[0].unit.as_deref(), Some("cups"));
    }

    #[test]
    fn test_unit_hint_from_quantity_token() {
        let spans = vec![
            span(EntityLabel::Ingredient, 0, "butter"),
            span(EntityLabel::Qty, 7, "200g"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(records[0].quantity, Some(QuantityValue::Number(200.0)));
        assert_eq!(records[0].unit.as_deref(), Some("g"));
    }

    #[test]
    fn test_explicit_unit_beats_later_hint() {
        let spans = vec![
            span(EntityLabel::Unit, 0, "cups"),
            span(EntityLabel::Ingredient, 5, "butter"),
            span(EntityLabel::Qty, 12, "200g"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(records[0].unit.as_deref(), Some("cups"));
    }

    #[test]
    fn test_textual_quantity_kept_as_fallback() {
        let spans = vec![
            span(EntityLabel::Qty, 0, "a few"),
            span(EntityLabel::Ingredient, 6, "olives"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(
            records[0].quantity,
            Some(QuantityValue::Text("a few".into()))
        );
    }

    #[test]
    fn test_form_spans() {
        let spans = vec![
            span(EntityLabel::Form, 0, "diced"),
            span(EntityLabel::Ingredient, 6, "onion"),
            span(EntityLabel::Ingredient, 13, "garlic"),
            span(EntityLabel::Form, 20, "minced"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].form.as_deref(), Some("diced"));
        assert_eq!(records[1].form.as_deref(), Some("minced"));
    }

    #[test]
    fn test_multiple_ingredients_split_cleanly() {
        let spans = vec![
            span(EntityLabel::Qty, 0, "200"),
            span(EntityLabel::Unit, 4, "g"),
            span(EntityLabel::Ingredient, 6, "penne"),
            span(EntityLabel::Qty, 14, "2"),
            span(EntityLabel::Unit, 16, "tbsp"),
            span(EntityLabel::Ingredient, 21, "olive oil"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "penne");
        assert_eq!(records[1].name, "olive oil");
        assert_eq!(records[1].quantity, Some(QuantityValue::Number(2.0)));
        assert_eq!(records[1].unit.as_deref(), Some("tbsp"));
    }

    #[test]
    fn test_unsorted_input_is_resorted() {
        let spans = vec![
            span(EntityLabel::Ingredient, 7, "flour"),
            span(EntityLabel::Qty, 0, "2"),
            span(EntityLabel::Unit, 2, "cups"),
        ];
        let records = group_ingredients(&spans);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity, Some(QuantityValue::Number(2.0)));
    }

    #[test]
    fn test_empty_input() {
        assert!(group_ingredients(&[]).is_empty());
    }
}
