//! History table rendering.
//!
//! Turns the output of [`crate::Tracker::list_history`] into a plain-text
//! table, one row per record, in the order given.

use crate::MeasurementRecord;

/// Shown instead of a table when there is nothing to list
pub const EMPTY_HISTORY_MESSAGE: &str = "No records found in the database.";

const HEADERS: [&str; 6] = ["ID", "Date/Time", "Weight (kg)", "Height (m)", "BMI", "Category"];

/// Render records as an aligned text table
///
/// Weight, height and BMI are printed with `decimals` places. Numeric
/// columns are right-aligned, text columns left-aligned.
pub fn render_table(records: &[MeasurementRecord], decimals: usize) -> String {
    if records.is_empty() {
        return EMPTY_HISTORY_MESSAGE.to_string();
    }

    let rows: Vec<[String; 6]> = records
        .iter()
        .map(|r| {
            [
                r.record_id.to_string(),
                r.formatted_timestamp(),
                format!("{:.*}", decimals, r.weight_kg),
                format!("{:.*}", decimals, r.height_m),
                format!("{:.*}", decimals, r.bmi_value),
                r.bmi_category.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(&HEADERS.map(String::from), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        lines.push(format_line(row, &widths));
    }

    lines.join("\n")
}

fn format_line(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, width))| {
            if is_numeric_column(col) {
                format!("{:>width$}", cell, width = *width)
            } else {
                format!("{:<width$}", cell, width = *width)
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn is_numeric_column(col: usize) -> bool {
    matches!(col, 0 | 2 | 3 | 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BmiCategory;
    use chrono::NaiveDate;

    fn record(id: i64, weight: f64, height: f64, category: BmiCategory) -> MeasurementRecord {
        MeasurementRecord {
            record_id: id,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            weight_kg: weight,
            height_m: height,
            bmi_value: weight / (height * height),
            bmi_category: category,
        }
    }

    #[test]
    fn test_empty_history_message() {
        assert_eq!(render_table(&[], 2), EMPTY_HISTORY_MESSAGE);
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let records = vec![
            record(2, 70.0, 1.75, BmiCategory::NormalWeight),
            record(1, 45.0, 1.6, BmiCategory::Underweight),
        ];

        let table = render_table(&records, 2);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID | Date/Time"));
        assert!(lines[0].ends_with("Category"));
        assert!(lines[2].contains("2024-01-15 09:30:00"));
        assert!(lines[2].contains("70.00"));
        assert!(lines[2].contains("22.86"));
        assert!(lines[2].ends_with("Normal weight"));
        assert!(lines[3].contains("17.58"));
        assert!(lines[3].ends_with("Underweight"));
    }

    #[test]
    fn test_rows_keep_given_order() {
        let records = vec![
            record(9, 90.0, 1.7, BmiCategory::Obesity),
            record(3, 80.0, 1.7, BmiCategory::Overweight),
        ];

        let table = render_table(&records, 2);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[2].trim_start().starts_with('9'));
        assert!(lines[3].trim_start().starts_with('3'));
    }

    #[test]
    fn test_decimals_are_configurable() {
        let records = vec![record(1, 70.0, 1.75, BmiCategory::NormalWeight)];

        let table = render_table(&records, 0);

        assert!(table.contains(" 23 "));
        assert!(!table.contains("22.86"));
    }

    #[test]
    fn test_columns_are_aligned() {
        let records = vec![
            record(1, 70.0, 1.75, BmiCategory::NormalWeight),
            record(100, 120.5, 1.9, BmiCategory::Obesity),
        ];

        let table = render_table(&records, 2);
        let separators: Vec<Vec<usize>> = table
            .lines()
            .filter(|l| !l.starts_with('-'))
            .map(|l| l.match_indices(" | ").map(|(i, _)| i).collect())
            .collect();

        assert!(separators.windows(2).all(|w| w[0] == w[1]));
    }
}
