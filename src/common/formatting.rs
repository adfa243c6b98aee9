//! Text formatting helpers shared by the chart and the console report

use crate::analysis::constants::TEMPLATE_PLACEHOLDER;

/// Formats a number in scientific notation with a signed, at least two digit exponent
///
/// Produces the same shape as C's `%.{precision}e`, e.g. `1e+06` or `2.5e-03`,
/// which is what tick labels and the element range annotation use.
/// Non-finite values fall back to their plain representation.
pub fn format_scientific(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
        }
        None => formatted,
    }
}

/// Formats a ratio with two decimals, spelling not-a-number as lowercase `nan`
///
/// Infinities already print as `inf` / `-inf`.
pub fn format_ratio(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Makes a distribution label safe to embed in a file name
///
/// Keeps ASCII alphanumerics, `-`, `_` and `.`; everything else becomes `_`.
/// Labels that would collapse to nothing, or to `.`/`..`, become `_`.
pub fn sanitize_label(label: &str) -> String {
    let sanitized: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        sanitized
    }
}

/// Substitutes an already sanitized label into an output file name template
pub fn apply_template(template: &str, sanitized_label: &str) -> String {
    template.replace(TEMPLATE_PLACEHOLDER, sanitized_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1_000_000.0, 0, "1e+06")]
    #[case(1024.0, 0, "1e+03")]
    #[case(268_435_456.0, 0, "3e+08")]
    #[case(1.0, 0, "1e+00")]
    #[case(0.0025, 1, "2.5e-03")]
    #[case(-4200.0, 0, "-4e+03")]
    #[case(1e120, 0, "1e+120")]
    fn formats_scientific_like_printf(
        #[case] value: f64,
        #[case] precision: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(format_scientific(value, precision), expected);
    }

    #[test]
    fn scientific_passes_through_non_finite() {
        assert_eq!(format_scientific(f64::INFINITY, 0), "inf");
        assert_eq!(format_scientific(f64::NAN, 0), "NaN");
    }

    #[rstest]
    #[case(4.5, "4.50")]
    #[case(1.0 / 3.0, "0.33")]
    #[case(f64::INFINITY, "inf")]
    #[case(f64::NAN, "nan")]
    fn formats_ratios_with_two_decimals(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_ratio(value), expected);
    }

    #[rstest]
    #[case("Uniform", "Uniform")]
    #[case("long-tail_v2.1", "long-tail_v2.1")]
    #[case("a/b", "a_b")]
    #[case("heavy skew", "heavy_skew")]
    #[case("..", "_")]
    #[case("", "_")]
    #[case("naïve", "na_ve")]
    fn sanitizes_labels(#[case] label: &str, #[case] expected: &str) {
        assert_eq!(sanitize_label(label), expected);
    }

    #[test]
    fn applies_template() {
        assert_eq!(
            apply_template("eytzinger_vs_binary_comparison_{}.png", "Uniform"),
            "eytzinger_vs_binary_comparison_Uniform.png"
        );
    }
}
