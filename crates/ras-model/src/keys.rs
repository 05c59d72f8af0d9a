//! Line keys used by HEC-RAS text files
//!
//! Every key includes its trailing `=`, so `Flow Hydrograph=` never matches
//! `Flow Hydrograph Slope=`.

/// Hydrograph header in an unsteady flow file; data rows follow it
pub const FLOW_HYDROGRAPH: &str = "Flow Hydrograph=";
/// Title of a flow file
pub const FLOW_TITLE: &str = "Flow Title=";
/// Title of a plan file
pub const PLAN_TITLE: &str = "Plan Title=";
/// Title of a geometry file
pub const GEOM_TITLE: &str = "Geom Title=";
/// Short plan name shown in HEC-RAS result listings
pub const SHORT_IDENTIFIER: &str = "Short Identifier=";
/// Flow file referenced by a plan
pub const FLOW_FILE: &str = "Flow File=";
/// Geometry file referenced by a plan or registered in a project
pub const GEOM_FILE: &str = "Geom File=";
/// Plan opened with the project
pub const CURRENT_PLAN: &str = "Current Plan=";
/// Unsteady flow file registered in a project
pub const UNSTEADY_FILE: &str = "Unsteady File=";
/// Steady flow file registered in a project
pub const STEADY_FILE: &str = "Flow File=";
/// Plan file registered in a project
pub const PLAN_FILE: &str = "Plan File=";

/// Append the `=` separator to a key that lacks it
#[must_use]
pub fn normalize(key: &str) -> String {
    if key.ends_with('=') {
        key.to_string()
    } else {
        format!("{key}=")
    }
}
