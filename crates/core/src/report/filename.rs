//! Deterministic export filename for a statement PDF.

use provisoria_shared::PeriodKey;

/// Sanitizes a debtor name for use inside a filename.
///
/// Strips everything that is not alphanumeric or whitespace, collapses
/// whitespace runs to single underscores, and lowercases the result.
#[must_use]
pub fn sanitize_debtor_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Builds the export filename for a statement:
/// `"{rol}_{clean_debtor}_{month_name}_{year}.pdf"`.
///
/// The month name is Spanish, as the file is named for tribunal submission.
#[must_use]
pub fn export_filename(rol: &str, debtor_name: &str, period: PeriodKey) -> String {
    format!(
        "{}_{}_{}_{}.pdf",
        rol,
        sanitize_debtor_name(debtor_name),
        period.month_name_es(),
        period.year
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Juan Pérez", "juan_pérez")]
    #[case("  Sociedad   Comercial  S.A. ", "sociedad_comercial_sa")]
    #[case("ACME-Ltda. (en quiebra)", "acmeltda_en_quiebra")]
    #[case("", "")]
    #[case("***", "")]
    fn test_sanitize_debtor_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_debtor_name(input), expected);
    }

    #[test]
    fn test_export_filename() {
        let period = PeriodKey::new(2024, 3).unwrap();
        assert_eq!(
            export_filename("C-1234-2023", "Juan Pérez Soto", period),
            "C-1234-2023_juan_pérez_soto_marzo_2024.pdf"
        );
    }

    #[test]
    fn test_export_filename_is_deterministic() {
        let period = PeriodKey::new(2025, 12).unwrap();
        let first = export_filename("V-99-2025", "Deudora S.A.", period);
        let second = export_filename("V-99-2025", "Deudora S.A.", period);
        assert_eq!(first, second);
        assert_eq!(first, "V-99-2025_deudora_sa_diciembre_2025.pdf");
    }
}
