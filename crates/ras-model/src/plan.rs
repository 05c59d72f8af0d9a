//! Plan file view

use crate::config_file::ConfigFile;
use crate::error::ModelError;
use crate::extension::RasExtension;
use crate::keys;
use crate::role::FileRole;
use serde::Serialize;

/// Fields of a plan file that automation cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRecord {
    /// Plan's own extension, when the path carries one
    pub extension: Option<RasExtension>,
    /// `Plan Title=`
    pub plan_title: Option<String>,
    /// `Short Identifier=`
    pub short_identifier: Option<String>,
    /// `Flow File=` (unsteady or steady flow)
    pub flow_file: Option<RasExtension>,
    /// `Geom File=`
    pub geom_file: Option<RasExtension>,
}

impl PlanRecord {
    /// Extract the record from a plan file
    ///
    /// # Errors
    /// - [`ModelError::InvalidFlowFile`] if `Flow File=` names something
    ///   other than a flow file
    /// - extension errors if `Geom File=` is malformed
    pub fn from_config(file: &ConfigFile) -> Result<Self, ModelError> {
        let flow_file = match non_empty(file.value(keys::FLOW_FILE)) {
            Some(text) => {
                let ext: RasExtension = text
                    .parse()
                    .map_err(|_| ModelError::InvalidFlowFile(text.to_string()))?;
                if !matches!(ext.role(), FileRole::UnsteadyFlow | FileRole::SteadyFlow) {
                    return Err(ModelError::InvalidFlowFile(text.to_string()));
                }
                Some(ext)
            }
            None => None,
        };

        let geom_file = non_empty(file.value(keys::GEOM_FILE))
            .map(str::parse::<RasExtension>)
            .transpose()?;

        Ok(Self {
            extension: file.extension().ok(),
            plan_title: non_empty(file.value(keys::PLAN_TITLE)).map(str::to_string),
            short_identifier: non_empty(file.value(keys::SHORT_IDENTIFIER)).map(str::to_string),
            flow_file,
            geom_file,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
