// src/common/dates.rs

use chrono::NaiveDate;

// Formato usado em todas as datas de domínio, na entrada e na saída
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lê uma data no formato estrito `AAAA-MM-DD` (ex: `2024-03-15`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    // O chrono aceita mês/dia com um dígito; aqui exigimos os dois.
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_the_literal_format() {
        let date = parse_date("2024-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(format_date(date), "2024-03-15");
    }

    #[test]
    fn rejects_other_layouts() {
        assert_eq!(parse_date("15/03/2024"), None);
        assert_eq!(parse_date("2024-3-5"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-03-15T00:00:00Z"), None);
    }
}
