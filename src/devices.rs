//! Mounted devices
//!
//! Lists block-device mounts from the live mount table. The list is rebuilt
//! on every call; an unreadable table just yields no devices.

use log::warn;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMount {
    pub label: String,
    pub mount_path: String,
}

pub fn list_devices(mount_table: &Path, device_prefix: &str) -> Vec<DeviceMount> {
    match fs::read_to_string(mount_table) {
        Ok(contents) => parse_mount_table(&contents, device_prefix),
        Err(e) => {
            warn!("Cannot read mount table {}: {}", mount_table.display(), e);
            Vec::new()
        }
    }
}

/// Keeps entries whose device field starts with `device_prefix`.
pub fn parse_mount_table(contents: &str, device_prefix: &str) -> Vec<DeviceMount> {
    contents
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount = fields.next()?;
            if !device.starts_with(device_prefix) {
                return None;
            }

            let mount_path = unescape_octal(mount);
            Some(DeviceMount {
                label: mount_label(&mount_path),
                mount_path,
            })
        })
        .collect()
}

fn mount_label(mount_path: &str) -> String {
    Path::new(mount_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| mount_path.to_string())
}

/// Undoes the kernel's `\ooo` escaping of whitespace and backslashes.
fn unescape_octal(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = &bytes[i + 1..i + 4];
            if digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
                let value = digits
                    .iter()
                    .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                if let Ok(byte) = u8::try_from(value) {
                    out.push(byte);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
