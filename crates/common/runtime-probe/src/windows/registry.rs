use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::ptr;

use runtime_probe_core::{FrameworkInstallation, InstalledReleases, ProbeError, ProbeResult};
use semver::Version;
use tracing::debug;
use windows_sys::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS};
use windows_sys::Win32::System::Registry::{
    HKEY, HKEY_LOCAL_MACHINE, KEY_READ, REG_DWORD, REG_SZ, RegCloseKey, RegOpenKeyExW,
    RegQueryValueExW,
};

const NDP_KEY: &str = r"SOFTWARE\Microsoft\NET Framework Setup\NDP";

/// 4.x release numbers and the versions they stand for, newest first. The
/// installer writes a single `Release` DWORD; anything at or above a row's
/// number means that row's version (or newer) is installed.
const RELEASE_TABLE: &[(u32, (u64, u64, u64))] = &[
    (533_320, (4, 8, 1)),
    (528_040, (4, 8, 0)),
    (461_808, (4, 7, 2)),
    (461_308, (4, 7, 1)),
    (460_798, (4, 7, 0)),
    (394_802, (4, 6, 2)),
    (394_254, (4, 6, 1)),
    (393_295, (4, 6, 0)),
    (379_893, (4, 5, 2)),
    (378_675, (4, 5, 1)),
    (378_389, (4, 5, 0)),
];

/// Pre-4.0 setup subkeys, newest first. Each installs side by side and
/// records its own `Version` string and optional `SP` level.
const LEGACY_SUBKEYS: &[&str] = &["v3.5", "v3.0", "v2.0.50727", "v1.1.4322"];

/// Installed-release lookup backed by the framework setup registry hive.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryReleases;

impl InstalledReleases for RegistryReleases {
    fn latest(&self, major: u64) -> Option<FrameworkInstallation> {
        let lookup = if major >= 4 {
            latest_v4_release()
        } else {
            latest_legacy_release()
        };
        match lookup {
            Ok(found) => found,
            Err(error) => {
                debug!(error = %error, "framework registry lookup failed");
                None
            }
        }
    }
}

fn latest_v4_release() -> ProbeResult<Option<FrameworkInstallation>> {
    let Some(key) = RegKey::open_local_machine(&format!(r"{NDP_KEY}\v4\Full"))? else {
        return Ok(None);
    };
    let Some(release) = key.read_dword("Release")? else {
        return Ok(None);
    };

    Ok(RELEASE_TABLE
        .iter()
        .find(|(threshold, _)| release >= *threshold)
        .map(|(_, (major, minor, patch))| FrameworkInstallation {
            version: Version::new(*major, *minor, *patch),
            service_pack: None,
            release: Some(release),
        }))
}

fn latest_legacy_release() -> ProbeResult<Option<FrameworkInstallation>> {
    for subkey in LEGACY_SUBKEYS {
        let Some(key) = RegKey::open_local_machine(&format!(r"{NDP_KEY}\{subkey}"))? else {
            continue;
        };
        let Some(text) = key.read_string("Version")? else {
            continue;
        };
        let Some(version) = FrameworkInstallation::parse_version(&text) else {
            debug!(version = %text, subkey = %subkey, "unparseable registry version");
            continue;
        };
        let service_pack = key.read_dword("SP")?.map(|sp| sp.to_string());
        return Ok(Some(FrameworkInstallation {
            version,
            service_pack,
            release: None,
        }));
    }
    Ok(None)
}

struct RegKey(HKEY);

impl RegKey {
    fn open_local_machine(path: &str) -> ProbeResult<Option<Self>> {
        let path = wide(path);
        let mut handle: HKEY = ptr::null_mut();
        let status = unsafe {
            RegOpenKeyExW(HKEY_LOCAL_MACHINE, path.as_ptr(), 0, KEY_READ, &mut handle)
        };
        match status {
            ERROR_SUCCESS => Ok(Some(Self(handle))),
            ERROR_FILE_NOT_FOUND => Ok(None),
            code => Err(ProbeError::registry(format!(
                "opening {path:?} failed with code {code}",
                path = path_label(&path),
            ))),
        }
    }

    fn read_dword(&self, name: &str) -> ProbeResult<Option<u32>> {
        let name = wide(name);
        let mut kind = 0u32;
        let mut data = 0u32;
        let mut size = size_of::<u32>() as u32;
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                name.as_ptr(),
                ptr::null_mut(),
                &mut kind,
                (&mut data as *mut u32).cast(),
                &mut size,
            )
        };
        match status {
            ERROR_SUCCESS if kind == REG_DWORD => Ok(Some(data)),
            ERROR_SUCCESS => Ok(None),
            ERROR_FILE_NOT_FOUND => Ok(None),
            code => Err(ProbeError::registry(format!(
                "reading value failed with code {code}"
            ))),
        }
    }

    fn read_string(&self, name: &str) -> ProbeResult<Option<String>> {
        let name = wide(name);
        let mut kind = 0u32;
        let mut size = 0u32;
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                name.as_ptr(),
                ptr::null_mut(),
                &mut kind,
                ptr::null_mut(),
                &mut size,
            )
        };
        match status {
            ERROR_SUCCESS if kind == REG_SZ => {}
            ERROR_SUCCESS | ERROR_FILE_NOT_FOUND => return Ok(None),
            code => {
                return Err(ProbeError::registry(format!(
                    "sizing value failed with code {code}"
                )));
            }
        }

        let mut buffer = vec![0u16; (size as usize).div_ceil(2)];
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                name.as_ptr(),
                ptr::null_mut(),
                &mut kind,
                buffer.as_mut_ptr().cast(),
                &mut size,
            )
        };
        if status != ERROR_SUCCESS {
            return Err(ProbeError::registry(format!(
                "reading value failed with code {status}"
            )));
        }
        while buffer.last() == Some(&0) {
            buffer.pop();
        }
        Ok(Some(String::from_utf16_lossy(&buffer)))
    }
}

impl Drop for RegKey {
    fn drop(&mut self) {
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

fn wide(text: &str) -> Vec<u16> {
    OsStr::new(text).encode_wide().chain(Some(0)).collect()
}

fn path_label(path: &[u16]) -> String {
    String::from_utf16_lossy(&path[..path.len().saturating_sub(1)])
}
