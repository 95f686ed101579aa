//! Release resolution against the versions/builds API.

use crate::api::{BuildRecord, ReleaseApi};
use crate::error::UpdateError;

/// A concrete build chosen for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub version: String,
    pub build: BuildRecord,
}

impl ResolvedRelease {
    /// Identifier persisted in the install marker. The artifact file name
    /// is unique per version and build, unlike the bare build number.
    pub fn identifier(&self) -> &str {
        self.build.artifact_name()
    }
}

pub struct Resolver<A> {
    api: A,
}

impl<A: ReleaseApi> Resolver<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Newest version that has at least one default-channel build.
    ///
    /// Right after an upstream Minecraft release the newest version often
    /// carries only experimental builds, so this scans backwards instead
    /// of taking the tail of the version list unconditionally.
    pub fn latest_stable_version(&self) -> Result<String, UpdateError> {
        let info = self.api.project()?;
        for version in info.versions.iter().rev() {
            let list = self.api.builds(version)?;
            if list.builds.iter().rev().any(|b| b.is_stable()) {
                return Ok(version.clone());
            }
        }
        Err(UpdateError::NoStableBuildFound)
    }

    /// Highest-numbered build for `version`, regardless of channel.
    /// "Latest build" answers what is newest, not what is safe to run.
    pub fn latest_build(&self, version: &str) -> Result<BuildRecord, UpdateError> {
        let list = self.api.builds(version)?;
        list.builds
            .into_iter()
            .max_by_key(|b| b.build)
            .ok_or_else(|| UpdateError::NoBuilds {
                version: version.to_string(),
            })
    }

    pub fn resolve_latest(&self) -> Result<ResolvedRelease, UpdateError> {
        let version = self.latest_stable_version()?;
        let build = self.latest_build(&version)?;
        Ok(ResolvedRelease { version, build })
    }

    pub fn download_url(&self, release: &ResolvedRelease) -> String {
        self.api.download_url(&release.version, &release.build)
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
