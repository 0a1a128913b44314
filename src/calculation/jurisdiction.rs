//! Jurisdiction resolution.
//!
//! Maps a worker's free-form payroll code to one of the configured regimes
//! by allow-list prefix.
//! Resolution fails open: anything that does not match the allow-list gets
//! the configured default regime with `inferred` set.

use crate::config::JurisdictionConfig;
use crate::models::RegimeResolution;

/// Extracts the leading jurisdiction token from a payroll code.
///
/// The token is the leading run of ASCII letters after trimming, upper-cased.
/// Returns `None` when the code does not start with a letter.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::extract_jurisdiction_token;
///
/// assert_eq!(extract_jurisdiction_token("ca-west-01"), Some("CA".to_string()));
/// assert_eq!(extract_jurisdiction_token("NV1234"), Some("NV".to_string()));
/// assert_eq!(extract_jurisdiction_token("  "), None);
/// assert_eq!(extract_jurisdiction_token("42-CA"), None);
/// ```
pub fn extract_jurisdiction_token(code: &str) -> Option<String> {
    let token: String = code
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if token.is_empty() { None } else { Some(token) }
}

/// Resolves a payroll code to a regime.
///
/// The trimmed, upper-cased code is matched against the allow-list as a
/// prefix, so `"CA-west"`, `"CA01"` and `"CAWEST01"` all resolve to `CA`.
/// When several tokens match, the longest wins and is reported as
/// `jurisdiction`. Missing codes and codes no token prefixes resolve to
/// `config.default_regime` with `inferred = true`; the leading token from
/// [`extract_jurisdiction_token`] is still reported so an operator can see
/// what failed to match.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::resolve_regime;
/// use overtime_engine::config::JurisdictionConfig;
/// use overtime_engine::models::Regime;
///
/// let config = JurisdictionConfig::default();
///
/// let resolved = resolve_regime(Some("CA-payroll-7"), &config);
/// assert_eq!(resolved.regime, Regime::TieredDailyWeekly);
/// assert!(!resolved.inferred);
///
/// let joined = resolve_regime(Some("CAWEST01"), &config);
/// assert_eq!(joined.jurisdiction.as_deref(), Some("CA"));
///
/// let fallback = resolve_regime(Some("TX-payroll-2"), &config);
/// assert_eq!(fallback.regime, Regime::FlatWeekly);
/// assert!(fallback.inferred);
/// ```
pub fn resolve_regime(code: Option<&str>, config: &JurisdictionConfig) -> RegimeResolution {
    match code.and_then(|c| config.match_prefix(c)) {
        Some((token, jurisdiction)) => RegimeResolution {
            regime: jurisdiction.regime,
            inferred: false,
            jurisdiction: Some(token.to_string()),
        },
        None => RegimeResolution {
            regime: config.default_regime,
            inferred: true,
            jurisdiction: code.and_then(extract_jurisdiction_token),
        },
    }
}
