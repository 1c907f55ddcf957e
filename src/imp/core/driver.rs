use crate::imp::prelude::*;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{
    env, fs,
    fs::OpenOptions,
    io,
    process::{Command, Stdio},
};
use zip::{result::ZipError, ZipArchive};

/// The Playwright driver bundle extracted on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    path: PathBuf,
}

impl Driver {
    const ZIP: &'static [u8] = include_bytes!(concat!(env!("OUT_DIR"), env!("SEP"), "driver.zip"));
    const PLATFORM: &'static str = include_str!(concat!(env!("OUT_DIR"), env!("SEP"), "platform"));
    pub const VERSION: &'static str = env!("PLAYWRIGHT_DRIVER_VERSION");

    /// Extracts the embedded bundle into [`Driver::default_dest`] unless it is already there.
    pub fn install() -> io::Result<Self> {
        let this = Self::new(Self::default_dest());
        if !this.path.join("package").is_dir() {
            log::debug!("extracting playwright driver into {}", this.path.display());
            this.prepare()?;
        }
        this.ensure_launcher_stub()?;
        Ok(this)
    }

    /// Without prepare
    pub fn new<P: Into<PathBuf>>(path: P) -> Self { Self { path: path.into() } }

    pub fn prepare(&self) -> Result<(), ZipError> {
        fs::create_dir_all(&self.path)?;
        let mut a = ZipArchive::new(io::Cursor::new(Self::ZIP))?;
        a.extract(&self.path)
    }

    pub fn default_dest() -> PathBuf {
        if let Ok(dir) = env::var("PLAYWRIGHT_DRIVER_DIR") {
            return PathBuf::from(dir);
        }
        let fallback = || {
            env::temp_dir()
                .join("wordle-smoke")
                .join(format!("driver-{}", Self::VERSION))
        };
        let base: PathBuf = match dirs::cache_dir() {
            Some(x) => x,
            None => return fallback(),
        };
        let dir = base
            .join("ms-playwright")
            .join("wordle-smoke")
            .join(format!("driver-{}", Self::VERSION));
        if is_writable(&dir) {
            dir
        } else {
            fallback()
        }
    }

    pub fn platform(&self) -> Platform {
        match Self::PLATFORM {
            "linux-arm64" => Platform::LinuxArm64,
            "mac" => Platform::Mac,
            "mac-arm64" => Platform::MacArm64,
            "win32" => Platform::Win32,
            "win32_x64" => Platform::Win32x64,
            _ => Platform::Linux,
        }
    }

    pub fn executable(&self) -> PathBuf {
        match self.platform() {
            Platform::Linux | Platform::LinuxArm64 | Platform::Mac | Platform::MacArm64 => {
                self.path.join("playwright.sh")
            }
            Platform::Win32 | Platform::Win32x64 => self.path.join("playwright.cmd"),
        }
    }

    /// Runs `playwright install <browser>...`. Already installed browsers are skipped by the driver.
    pub fn install_browsers(&self, browsers: &[&str]) -> io::Result<()> {
        log::debug!("installing browsers {:?}", browsers);
        let status = Command::new(self.executable())
            .arg("install")
            .args(browsers)
            .stdin(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "playwright install {} exited with {}",
                browsers.join(" "),
                status
            )))
        }
    }

    fn ensure_launcher_stub(&self) -> io::Result<()> {
        let launcher = self.executable();

        #[cfg(windows)]
        let stub = {
            let node = if self.path.join("node.exe").exists() {
                "node.exe"
            } else {
                "node"
            };
            // `run-driver` keeps the event loop parked so the driver outlives its first idle tick.
            format!(
                "@echo off\r\nsetlocal\r\nset \"DIR=%~dp0\"\r\nset \"PW_DRIVER_DIR=%DIR%\"\r\nif \"%1\"==\"run-driver\" (\r\n  \"%DIR%{node}\" -e \"const path=require('path');const dir=process.env.PW_DRIVER_DIR;const driver=require(path.join(dir,'package','lib','cli','driver'));driver.runDriver();setInterval(()=>{{}},2147483647);\" %*\r\n) else (\r\n  \"%DIR%{node}\" \"%DIR%package\\cli.js\" %*\r\n)\r\n",
                node = node
            )
        };

        #[cfg(not(windows))]
        let stub = r#"#!/bin/sh
set -e
DIR="$(CDPATH= cd -- "$(dirname "$0")" && pwd)"
export PW_DRIVER_DIR="$DIR"
if [ "${1-}" = "run-driver" ]; then
  exec "$DIR/node" -e "const path=require('path');const dir=process.env.PW_DRIVER_DIR;const driver=require(path.join(dir,'package','lib','cli','driver'));driver.runDriver();setInterval(()=>{},2147483647);" "$@"
else
  exec "$DIR/node" "$DIR/package/cli.js" "$@"
fi
"#;

        fs::write(&launcher, stub)?;

        #[cfg(unix)]
        fs::set_permissions(&launcher, fs::Permissions::from_mode(0o755))?;

        Ok(())
    }
}

fn is_writable(dir: &Path) -> bool {
    if fs::create_dir_all(dir).is_err() {
        return false;
    }
    let marker = dir.join(".write_test");
    let ok = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&marker)
        .is_ok();
    let _ = fs::remove_file(&marker);
    ok
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    LinuxArm64,
    Win32,
    Win32x64,
    Mac,
    MacArm64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dest_is_versioned() {
        if env::var("PLAYWRIGHT_DRIVER_DIR").is_ok() {
            return;
        }
        let dest = Driver::default_dest();
        assert!(dest.ends_with(format!("driver-{}", Driver::VERSION)));
    }

    #[cfg(unix)]
    #[test]
    fn launcher_is_a_shell_script() {
        let dir = tempdir::TempDir::new("driver").unwrap();
        let driver = Driver::new(dir.path());
        driver.ensure_launcher_stub().unwrap();
        let exe = driver.executable();
        assert!(exe.ends_with("playwright.sh"));
        let script = fs::read_to_string(&exe).unwrap();
        assert!(script.starts_with("#!/bin/sh"));
        assert!(script.contains("run-driver"));
        let mode = fs::metadata(&exe).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
