//! Owner name lookup through the system account database.

use std::ffi::CStr;
use std::{mem, ptr};

/// Maps a uid to its account name, falling back to the numeric id.
pub fn owner_name(uid: u32) -> String {
    lookup_user(uid).unwrap_or_else(|| uid.to_string())
}

fn lookup_user(uid: u32) -> Option<String> {
    let mut buf = vec![0; 2048];
    let mut passwd = unsafe { mem::zeroed::<libc::passwd>() };
    let mut result = ptr::null_mut::<libc::passwd>();

    loop {
        let r = unsafe {
            libc::getpwuid_r(uid, &mut passwd, buf.as_mut_ptr(), buf.len(), &mut result)
        };

        if r != libc::ERANGE {
            break;
        }

        let newsize = buf.len().checked_mul(2)?;
        buf.resize(newsize, 0);
    }

    if result.is_null() || passwd.pw_name.is_null() {
        return None;
    }

    let name = unsafe { CStr::from_ptr(passwd.pw_name) };
    Some(name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_resolves_by_name() {
        assert_eq!(owner_name(0), "root");
    }

    #[test]
    fn test_unknown_uid_falls_back_to_number() {
        assert_eq!(owner_name(4_000_000_000), "4000000000");
    }
}
