//! Testing utilities for the RAS Edit workspace
//!
//! Sample HEC-RAS files and temporary project directories.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use ras_model::{FileRole, RasExtension};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File stem shared by every sample file
pub const STEM: &str = "MW_Valleys";

pub const PLAN_P01: &str = concat!(
    "Plan Title=MW_4cms\r\n",
    "Program Version=6.10\r\n",
    "Short Identifier=MW_4cms                                                         \r\n",
    "Simulation Date=28AUG2024,0100,28AUG2024,0500\r\n",
    "Geom File=g01\r\n",
    "Flow File=u01\r\n",
    "Subcritical Flow\r\n",
    "K Sum by GR= 0 \r\n",
    "Std Step Tol= 0.003 \r\n",
    "Critical Tol= 0.003 \r\n",
    "Num of Std Step Trials= 20 \r\n",
    "Max Error Tol= 0.1 \r\n",
    "Flow Tol Ratio= 0.001 \r\n",
    "Split Flow NTrial= 30 \r\n",
);

pub const FLOW_U01: &str = concat!(
    "Flow Title=MW_4cms\r\n",
    "Program Version=6.10\r\n",
    "Use Restart= 0 \r\n",
    "Boundary Location=                ,                ,        ,        ,                ,MW_Valley       ,                ,BC Line Up                      \r\n",
    "Interval=1HOUR\r\n",
    "Flow Hydrograph= 6 \r\n",
    "      .4      .8     1.5       3       3       3\r\n",
    "Stage Hydrograph TW Check=0\r\n",
    "Flow Hydrograph Slope= 0.1 \r\n",
    "DSS Path=\r\n",
    "Use DSS=False\r\n",
    "Use Fixed Start Time=False\r\n",
    "Fixed Start Date/Time=28AUG2024,0500\r\n",
    "Is Critical Boundary=False\r\n",
);

pub const GEOMETRY_G01: &str = concat!(
    "Geom Title=MW_valley\r\n",
    "Program Version=6.10\r\n",
    "Viewing Rectangle= 454138.350788632 , 454996.859145258 , 4500484.99527748 , 4499489.5183865 \r\n",
);

pub const PROJECT_PRJ: &str = concat!(
    "Proj Title=MW_Valleys\r\n",
    "Current Plan=p01\r\n",
    "Default Exp/Contr=0.3,0.1\r\n",
    "SI Units\r\n",
    "Geom File=g01\r\n",
    "Unsteady File=u01\r\n",
    "Plan File=p01\r\n",
    "Y Axis Title=Elevation\r\n",
    "X Axis Title(PF)=Main Channel Distance\r\n",
);

/// Temporary HEC-RAS project directory
///
/// Removed when dropped.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    /// Project with `.prj`, `p01`, `u01` and `g01` sample files
    pub fn new() -> Self {
        let fixture = Self::empty();
        fixture.write(&format!("{STEM}.prj"), PROJECT_PRJ);
        fixture.write(&format!("{STEM}.p01"), PLAN_P01);
        fixture.write(&format!("{STEM}.u01"), FLOW_U01);
        fixture.write(&format!("{STEM}.g01"), GEOMETRY_G01);
        fixture
    }

    /// Empty directory
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `{STEM}.{extension}`
    pub fn path(&self, extension: &str) -> PathBuf {
        self.dir().join(format!("{STEM}.{extension}"))
    }

    pub fn plan(&self, number: u32) -> PathBuf {
        self.numbered(RasExtension::new(FileRole::Plan, number))
    }

    pub fn flow(&self, number: u32) -> PathBuf {
        self.numbered(RasExtension::new(FileRole::UnsteadyFlow, number))
    }

    pub fn project(&self) -> PathBuf {
        self.path("prj")
    }

    fn numbered(&self, extension: RasExtension) -> PathBuf {
        self.path(&extension.to_string())
    }

    /// Write `content` to `name` inside the fixture
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir().join(name);
        fs::write(&path, content).expect("write fixture file");
        path
    }

    /// Create empty files, e.g. to occupy sequence numbers
    pub fn touch(&self, names: &[&str]) {
        for name in names {
            self.write(name, "");
        }
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        fs::read_to_string(path).expect("read fixture file")
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
