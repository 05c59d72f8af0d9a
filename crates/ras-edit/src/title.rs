//! Scenario titles
//!
//! Titles follow the `{site}_{flow}{unit}` convention, e.g. `MW_4cms`.
//! A new scenario keeps the site prefix and swaps the flow.

/// Flow magnitude as written in a title
///
/// Integral flows print without decimals (`8`); fractional flows print with
/// two decimals and the point replaced by `o` (`2.5` → `2o50`), since titles
/// double as file-system friendly identifiers.
#[must_use]
pub fn flow_token(flow: f64) -> String {
    #[allow(clippy::float_cmp)]
    let integral = flow.fract() == 0.0;
    if integral {
        format!("{flow:.0}")
    } else {
        format!("{flow:.2}").replace('.', "o")
    }
}

/// Swap the flow part of `old` for `flow`
///
/// Everything before the first `_` is kept; a title without `_` is kept
/// whole as the prefix.
#[must_use]
pub fn derive_title(old: &str, flow: f64, unit: &str) -> String {
    let prefix = old.trim().split('_').next().unwrap_or_default();
    format!("{prefix}_{}{unit}", flow_token(flow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_flow() {
        assert_eq!(flow_token(8.0), "8");
        assert_eq!(flow_token(120.0), "120");
    }

    #[test]
    fn fractional_flow() {
        assert_eq!(flow_token(2.5), "2o50");
        assert_eq!(flow_token(0.25), "0o25");
    }

    #[test]
    fn swap_flow_in_title() {
        assert_eq!(derive_title("MW_4cms", 8.0, "cms"), "MW_8cms");
        assert_eq!(derive_title("MW_4cms", 2.5, "cms"), "MW_2o50cms");
    }

    #[test]
    fn only_first_underscore_splits() {
        assert_eq!(derive_title("MW_Valleys_10cms", 3.0, "cfs"), "MW_3cfs");
    }

    #[test]
    fn title_without_underscore() {
        assert_eq!(derive_title("Baseline", 4.0, "cms"), "Baseline_4cms");
        assert_eq!(derive_title("  MW_4cms  ", 4.0, "cms"), "MW_4cms");
    }
}
