//! Reading, merging and writing kubeconfig files

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::merge::merge;
use crate::types::Kubeconfig;

/// `~/.kube/config`
pub fn default_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".kube").join("config"))
        .ok_or(Error::HomeDir)
}

impl Kubeconfig {
    /// Read a kubeconfig file. A file that does not exist yields `None`.
    pub async fn read(path: &Path) -> Result<Option<Self>> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                let config = Self::from_yaml(&contents)
                    .map_err(|e| Error::Yaml(format!("{}: {e}", path.display())))?;
                debug!(path = %path.display(), users = config.users.len(), "read kubeconfig");
                Ok(Some(config))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "kubeconfig not found");
                Ok(None)
            }
            Err(e) => Err(Error::Io(format!("reading {}: {e}", path.display()))),
        }
    }

    /// Write the document to `path`, replacing its contents in place.
    ///
    /// Parent directories are created as needed. A newly created file gets
    /// 0600 permissions since it holds credentials; an existing file keeps
    /// its mode.
    pub async fn write_to_file(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| Error::Io(format!("creating {}: {e}", dir.display())))?;
        }

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(path)
            .await
            .map_err(|e| Error::Io(format!("opening {}: {e}", path.display())))?;
        file.write_all(yaml.as_bytes())
            .await
            .map_err(|e| Error::Io(format!("writing {}: {e}", path.display())))?;
        file.flush()
            .await
            .map_err(|e| Error::Io(format!("writing {}: {e}", path.display())))?;

        debug!(path = %path.display(), bytes = yaml.len(), "wrote kubeconfig");
        Ok(())
    }
}

/// Load `paths` in precedence order and merge them. Missing files are skipped.
pub async fn load_merged(paths: &[PathBuf]) -> Result<Kubeconfig> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        if let Some(config) = Kubeconfig::read(path).await? {
            sources.push(config);
        }
    }
    Ok(merge(sources))
}

/// Merge `partial` into the kubeconfig at `target` and write the result back.
///
/// `partial` is staged in a temporary file that is loaded ahead of `target`,
/// so its entries win on collision. The temporary file is removed when this
/// returns. Returns the merged document.
pub async fn merge_into_file(partial: &Kubeconfig, target: &Path) -> Result<Kubeconfig> {
    let mut staged = tempfile::NamedTempFile::new()
        .map_err(|e| Error::Io(format!("could not create tempfile: {e}")))?;
    let yaml = partial.to_yaml()?;
    staged
        .write_all(yaml.as_bytes())
        .map_err(|e| Error::Io(format!("writing tempfile: {e}")))?;
    staged
        .flush()
        .map_err(|e| Error::Io(format!("writing tempfile: {e}")))?;

    let merged = load_merged(&[staged.path().to_path_buf(), target.to_path_buf()]).await?;
    merged.write_to_file(target).await?;

    info!(
        path = %target.display(),
        users = merged.users.len(),
        "merged kubeconfig written"
    );
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth_info::OidcConfig;
    use crate::types::AuthInfo;

    fn partial(email: &str, id_token: &str) -> Kubeconfig {
        Kubeconfig::with_user(
            email,
            AuthInfo::oidc(OidcConfig {
                client_id: "X".into(),
                client_secret: "Y".into(),
                id_token: id_token.into(),
                refresh_token: "rt1".into(),
                idp_issuer_url: "https://accounts.google.com".into(),
            }),
        )
    }

    const EXISTING: &str = "\
apiVersion: v1
kind: Config
current-context: ops
clusters:
- name: ops
  cluster:
    server: https://ops.example.com
contexts:
- name: ops
  context:
    cluster: ops
    user: robot
users:
- name: robot
  user:
    token: robot-token
";

    #[tokio::test]
    async fn read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = Kubeconfig::read(&dir.path().join("config")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn read_reports_invalid_yaml_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        tokio::fs::write(&path, "users: [oops").await.unwrap();

        let err = Kubeconfig::read(&path).await.unwrap_err();
        assert!(err.to_string().contains("config"), "got: {err}");
    }

    #[tokio::test]
    async fn merge_into_missing_file_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".kube").join("config");

        merge_into_file(&partial("user@example.com", "idt1"), &target)
            .await
            .unwrap();

        let written = Kubeconfig::read(&target).await.unwrap().unwrap();
        assert_eq!(written.users.len(), 1);
        assert_eq!(written.users[0].name, "user@example.com");
    }

    #[tokio::test]
    async fn merge_into_existing_file_keeps_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("config");
        tokio::fs::write(&target, EXISTING).await.unwrap();
        let before = Kubeconfig::from_yaml(EXISTING).unwrap();

        let merged = merge_into_file(&partial("user@example.com", "idt1"), &target)
            .await
            .unwrap();

        let written = Kubeconfig::read(&target).await.unwrap().unwrap();
        assert_eq!(written, merged);
        assert_eq!(written.current_context, "ops");
        assert_eq!(written.clusters, before.clusters);
        assert_eq!(written.contexts, before.contexts);
        assert_eq!(written.user("robot"), before.user("robot"));
        assert!(written.user("user@example.com").is_some());
    }

    #[tokio::test]
    async fn rerun_replaces_only_the_same_email() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("config");
        tokio::fs::write(&target, EXISTING).await.unwrap();

        merge_into_file(&partial("user@example.com", "first"), &target)
            .await
            .unwrap();
        let after_first = tokio::fs::read_to_string(&target).await.unwrap();

        merge_into_file(&partial("user@example.com", "second"), &target)
            .await
            .unwrap();
        let after_second = tokio::fs::read_to_string(&target).await.unwrap();

        assert_eq!(
            after_first.replace("id-token: first", "id-token: second"),
            after_second
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn new_file_permissions_are_0600() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("config");
        Kubeconfig::default().write_to_file(&target).await.unwrap();

        let metadata = tokio::fs::metadata(&target).await.unwrap();
        let mode = metadata.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "kubeconfig must be 0600, got {mode:o}");
    }

    #[tokio::test]
    async fn load_merged_skips_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present");
        tokio::fs::write(&present, EXISTING).await.unwrap();

        let merged = load_merged(&[dir.path().join("absent"), present])
            .await
            .unwrap();
        assert_eq!(merged.users.len(), 1);
        assert_eq!(merged.current_context, "ops");
    }
}
