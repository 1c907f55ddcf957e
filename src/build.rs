use std::{
    env, fmt, fs,
    fs::File,
    path::{Path, PathBuf, MAIN_SEPARATOR},
};

// Playwright release tag of the driver bundle that gets embedded in the binary.
// The bundle installs Chromium at runtime.
const DRIVER_VERSION: &str = "1.57.0";

const MIRRORS: &[&str] = &[
    "https://playwright.azureedge.net/builds/driver",
    "https://cdn.playwright.dev/builds/driver",
];

fn main() {
    let out_dir: PathBuf = env::var_os("OUT_DIR").unwrap().into();
    let dest = out_dir.join("driver.zip");
    let platform = PlaywrightPlatform::default();
    fs::write(out_dir.join("platform"), platform.to_string()).unwrap();
    download(platform, &dest);
    println!("cargo:rerun-if-changed=src/build.rs");
    println!("cargo:rustc-env=SEP={}", MAIN_SEPARATOR);
    println!("cargo:rustc-env=PLAYWRIGHT_DRIVER_VERSION={}", DRIVER_VERSION);
}

#[cfg(not(feature = "only-for-docs-rs"))]
fn download(platform: PlaywrightPlatform, dest: &Path) {
    let cached = cache_path(platform);
    if cfg!(debug_assertions) && size(&cached) > 10_000_000 {
        fs::copy(&cached, dest).unwrap();
        return;
    }
    let mut last_err = None;
    for url in urls(platform) {
        match fetch(&url, dest) {
            Ok(()) => {
                check_size(dest);
                if cfg!(debug_assertions) {
                    if let Some(dir) = cached.parent() {
                        fs::create_dir_all(dir).unwrap();
                    }
                    fs::copy(dest, &cached).unwrap();
                }
                return;
            }
            Err(e) => {
                println!("cargo:warning=failed to download {}: {}", url, e);
                last_err = Some(e);
            }
        }
    }
    panic!("could not download the playwright driver: {:?}", last_err);
}

#[cfg(not(feature = "only-for-docs-rs"))]
fn fetch(url: &str, dest: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut resp = reqwest::blocking::get(url)?.error_for_status()?;
    let mut file = File::create(dest)?;
    resp.copy_to(&mut file)?;
    Ok(())
}

// No network access
#[cfg(feature = "only-for-docs-rs")]
fn download(_platform: PlaywrightPlatform, dest: &Path) {
    File::create(dest).unwrap();
}

#[cfg(not(feature = "only-for-docs-rs"))]
fn cache_path(platform: PlaywrightPlatform) -> PathBuf {
    env::temp_dir()
        .join("build-wordle-smoke")
        .join(format!("playwright-{}-{}.zip", DRIVER_VERSION, platform))
}

fn size(p: &Path) -> u64 { p.metadata().map(|m| m.len()).unwrap_or_default() }

#[cfg(not(feature = "only-for-docs-rs"))]
fn check_size(p: &Path) {
    assert!(size(p) > 10_000_000, "file size is smaller than the driver");
}

fn urls(platform: PlaywrightPlatform) -> Vec<String> {
    // Nightly builds live under /next; stable tags do not.
    let next = if DRIVER_VERSION.contains("next") {
        "/next"
    } else {
        ""
    };
    MIRRORS
        .iter()
        .map(|base| {
            format!(
                "{}{}/playwright-{}-{}.zip",
                base, next, DRIVER_VERSION, platform
            )
        })
        .collect()
}

#[derive(Clone, Copy)]
enum PlaywrightPlatform {
    LinuxX64,
    LinuxArm64,
    Win32,
    Win32x64,
    MacX64,
    MacArm64,
}

impl fmt::Display for PlaywrightPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinuxX64 => write!(f, "linux"),
            Self::LinuxArm64 => write!(f, "linux-arm64"),
            Self::Win32 => write!(f, "win32"),
            Self::Win32x64 => write!(f, "win32_x64"),
            Self::MacX64 => write!(f, "mac"),
            Self::MacArm64 => write!(f, "mac-arm64"),
        }
    }
}

impl Default for PlaywrightPlatform {
    fn default() -> Self {
        let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        let arm = env::var("CARGO_CFG_TARGET_ARCH").as_deref() == Ok("aarch64");
        match os.as_str() {
            "linux" if arm => Self::LinuxArm64,
            "linux" => Self::LinuxX64,
            "macos" if arm => Self::MacArm64,
            "macos" => Self::MacX64,
            _ if env::var("CARGO_CFG_WINDOWS").is_ok() => {
                if env::var("CARGO_CFG_TARGET_POINTER_WIDTH").as_deref() == Ok("64") {
                    Self::Win32x64
                } else {
                    Self::Win32
                }
            }
            _ if env::var("CARGO_CFG_UNIX").is_ok() => Self::LinuxX64,
            _ => panic!("Unsupported plaform"),
        }
    }
}
