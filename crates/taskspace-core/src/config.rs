use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use tracing::{
  debug,
  info,
  warn
};

const RC_FILE_NAME: &str = ".taskspacerc";
const RC_ENV_VAR: &str = "TASKSPACERC";
const DEFAULT_DATA_DIR: &str =
  "~/.taskspace";

/// Settings read from `.taskspacerc`
/// and `rc.<key>=<value>` overrides.
///
/// Recognized keys are
/// `data.location`, `default.command`
/// and `color`. Unknown keys are
/// logged and ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub data_location:   PathBuf,
  pub default_command: String,
  pub color:           bool,
  pub sources:         Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    Self {
      data_location:   PathBuf::from(
        DEFAULT_DATA_DIR
      ),
      default_command: "workspaces"
        .to_string(),
      color:           true,
      sources:         Vec::new()
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::default();

    match locate_rc(rc_override) {
      | Some(path) => {
        info!(rc = %path.display(), "loading taskspacerc");
        let mut chain = Vec::new();
        cfg.read_rc(&path, &mut chain)?;
      }
      | None => {
        debug!(
          "no taskspacerc; using \
           defaults"
        );
      }
    }

    Ok(cfg)
  }

  /// Applies `--rc` pairs. A leading
  /// `rc.` on the key is optional.
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      let key = key
        .strip_prefix("rc.")
        .unwrap_or(&key);
      debug!(key, value = %value, "applying override");
      self.set(key, &value)?;
    }
    Ok(())
  }

  pub fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    match key {
      | "data.location" => {
        self.data_location =
          PathBuf::from(value);
      }
      | "default.command" => {
        self.default_command =
          value.to_string();
      }
      | "color" => {
        self.color = parse_switch(value)
          .ok_or_else(|| {
            anyhow!(
              "invalid color setting: \
               {value}"
            )
          })?;
      }
      | other => {
        warn!(
          key = other,
          "ignoring unknown setting"
        );
      }
    }
    Ok(())
  }

  /// Directory holding
  /// `storage.json`, created on
  /// demand. `--data` wins over
  /// `data.location`.
  #[tracing::instrument(skip(self))]
  pub fn data_dir(
    &self,
    override_dir: Option<&Path>
  ) -> anyhow::Result<PathBuf> {
    let dir = match override_dir {
      | Some(path) => path.to_path_buf(),
      | None => {
        expand_home(&self.data_location)?
      }
    };

    if !dir.exists() {
      info!(dir = %dir.display(), "creating data directory");
      fs::create_dir_all(&dir)
        .with_context(|| {
          format!(
            "failed to create {}",
            dir.display()
          )
        })?;
    }
    Ok(dir)
  }

  /// `chain` holds the files currently
  /// being read, outermost first.
  fn read_rc(
    &mut self,
    path: &Path,
    chain: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let path = expand_home(path)?;
    let canonical = path
      .canonicalize()
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    if chain.contains(&canonical) {
      bail!(
        "include cycle at {}",
        canonical.display()
      );
    }

    let text =
      fs::read_to_string(&canonical)
        .with_context(|| {
          format!(
            "failed to read {}",
            canonical.display()
          )
        })?;
    self.sources.push(canonical.clone());
    chain.push(canonical.clone());

    let dir = canonical
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_default();

    for (index, raw) in
      text.lines().enumerate()
    {
      let line = raw
        .split_once('#')
        .map_or(raw, |(before, _)| before)
        .trim();
      if line.is_empty() {
        continue;
      }

      if let Some(target) =
        line.strip_prefix("include ")
      {
        let target = target.trim();
        if target.is_empty() {
          bail!(
            "{}:{}: include needs a path",
            canonical.display(),
            index + 1
          );
        }
        let target =
          dir.join(expand_home(Path::new(
            target
          ))?);
        if target.exists() {
          self.read_rc(&target, chain)?;
        } else {
          warn!(include = %target.display(), "skipping missing include");
        }
        continue;
      }

      let Some((key, value)) =
        line.split_once('=')
      else {
        bail!(
          "{}:{}: expected key=value, \
           got {raw:?}",
          canonical.display(),
          index + 1
        );
      };
      self
        .set(key.trim(), value.trim())
        .with_context(|| {
          format!(
            "{}:{}",
            canonical.display(),
            index + 1
          )
        })?;
    }

    chain.pop();
    Ok(())
  }
}

/// `--taskspacerc`, then
/// `$TASKSPACERC` (`/dev/null` turns
/// the file off), then
/// `~/.taskspacerc` if present.
fn locate_rc(
  rc_override: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = rc_override {
    return Some(path.to_path_buf());
  }
  if let Ok(env) =
    std::env::var(RC_ENV_VAR)
  {
    return (env != "/dev/null")
      .then(|| PathBuf::from(env));
  }
  dirs::home_dir()
    .map(|home| home.join(RC_FILE_NAME))
    .filter(|candidate| {
      candidate.exists()
    })
}

fn expand_home(
  path: &Path
) -> anyhow::Result<PathBuf> {
  let Ok(rest) = path.strip_prefix("~")
  else {
    return Ok(path.to_path_buf());
  };
  let home =
    dirs::home_dir().ok_or_else(|| {
      anyhow!(
        "cannot determine home \
         directory for {}",
        path.display()
      )
    })?;
  Ok(home.join(rest))
}

fn parse_switch(
  value: &str
) -> Option<bool> {
  match value
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "on" | "yes" | "true" | "1" => {
      Some(true)
    }
    | "off" | "no" | "false" | "0" => {
      Some(false)
    }
    | _ => None
  }
}
