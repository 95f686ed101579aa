mod build;
mod download;
mod home;
mod installed;
mod version;

pub(super) use build::BuildView;
pub(super) use download::DownloadView;
pub(super) use home::HomeView;
pub(super) use installed::InstalledBuildView;
pub(super) use version::VersionView;
