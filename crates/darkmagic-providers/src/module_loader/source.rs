//! Where an artifact lives, and the locator that names it

use std::path::{Path, PathBuf};

use darkmagic_domain::value_objects::{Locator, Origin};

use crate::constants::{FILE_LOCATOR_PREFIX, MOUNT_LOCATOR_PREFIX, PACKAGE_LOCATOR_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Source {
    Mount { dir: PathBuf, name: String },
    File(PathBuf),
    Package(String),
}

impl Source {
    pub(crate) fn locator(&self) -> Locator {
        match self {
            Self::Mount { dir, name } => Locator::new(format!(
                "{MOUNT_LOCATOR_PREFIX}{}",
                dir.join(name).display()
            )),
            Self::File(path) => Locator::new(format!("{FILE_LOCATOR_PREFIX}{}", path.display())),
            Self::Package(name) => Locator::new(format!("{PACKAGE_LOCATOR_PREFIX}{name}")),
        }
    }

    pub(crate) fn parse(locator: &Locator) -> Option<Self> {
        let locator = locator.as_str();
        if let Some(mounted) = locator.strip_prefix(MOUNT_LOCATOR_PREFIX) {
            let path = Path::new(mounted);
            let name = path.file_name()?.to_str()?.to_string();
            let dir = path.parent()?.to_path_buf();
            return Some(Self::Mount { dir, name });
        }
        if let Some(file) = locator.strip_prefix(FILE_LOCATOR_PREFIX) {
            return Some(Self::File(PathBuf::from(file)));
        }
        locator
            .strip_prefix(PACKAGE_LOCATOR_PREFIX)
            .map(|name| Self::Package(name.to_string()))
    }

    pub(crate) fn origin(&self) -> Origin {
        match self {
            Self::Mount { .. } | Self::File(_) => Origin::Local,
            Self::Package(_) => Origin::External,
        }
    }
}
