//! Display formatting for sizes and permission bits.

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Formats a byte count with binary units and one decimal place.
///
/// The largest unit whose value is still at least one is chosen, so 1023
/// stays "1023 B" and 1024 becomes "1.0 KB".
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GIB as f64)
    }
}

/// Renders the owner/group/other triads of a POSIX mode, e.g. `rwx r-x r--`.
pub fn format_mode(mode: u32) -> String {
    const FLAGS: [char; 3] = ['r', 'w', 'x'];

    (0..3)
        .map(|triad| {
            let bits = (mode >> (6 - triad * 3)) & 0o7;
            FLAGS
                .iter()
                .enumerate()
                .map(|(i, c)| if bits & (0o4 >> i) != 0 { *c } else { '-' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
