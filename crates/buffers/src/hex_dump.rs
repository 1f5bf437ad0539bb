//! Multi-line hex dump for diagnostic display.

use std::fmt::Write as _;

/// Number of bytes per row used when a dump is requested with zero columns.
pub const DEFAULT_COLUMNS: usize = 16;

/// Widest row a dump renders; larger column counts are clamped to it.
pub const MAX_COLUMNS: usize = 256;

/// Renders `count` bytes of `bytes`, starting at `offset`, as a hex dump.
///
/// Each row holds `columns` bytes: the row address (8 hex digits, or 16 when
/// the last address does not fit in 32 bits), two spaces, each byte as two
/// upper-case hex digits and a space, one more space, then an ASCII gutter
/// where bytes in `[32, 127)` print as themselves and anything else as `.`.
/// The address of a row is `base_address + offset + row_start`.
///
/// `offset` and `count` are clamped to the buffer. Zero `columns` falls
/// back to [`DEFAULT_COLUMNS`], and anything above [`MAX_COLUMNS`] is
/// clamped to it.
///
/// # Example
///
/// ```
/// use convertkit_buffers::to_hex_dump;
///
/// let dump = to_hex_dump(b"Hi!\x00", 0, 4, false, 4, 0);
/// assert_eq!(dump, "00000000  48 69 21 00  Hi!.\n");
/// ```
pub fn to_hex_dump(
    bytes: &[u8],
    offset: usize,
    count: usize,
    add_header: bool,
    columns: usize,
    base_address: u64,
) -> String {
    let columns = match columns {
        0 => DEFAULT_COLUMNS,
        n => n.min(MAX_COLUMNS),
    };
    let offset = offset.min(bytes.len());
    let count = count.min(bytes.len() - offset);
    let window = &bytes[offset..offset + count];

    let first_address = base_address.saturating_add(offset as u64);
    let last_address = first_address.saturating_add(count.saturating_sub(1) as u64);
    let address_width = if last_address > u32::MAX as u64 { 16 } else { 8 };

    let rows = count.div_ceil(columns);
    let row_width = address_width + 4 * columns + 4;
    let mut out = String::with_capacity(rows.saturating_add(2).saturating_mul(row_width));

    if add_header {
        let _ = write!(out, "{:<width$}  ", "Offset", width = address_width);
        for column in 0..columns {
            let _ = write!(out, "{:02X} ", column);
        }
        out.push(' ');
        for column in 0..columns {
            let _ = write!(out, "{:X}", column % 16);
        }
        out.push('\n');

        out.push_str(&"-".repeat(address_width));
        out.push_str("  ");
        out.push_str(&"-".repeat(3 * columns - 1));
        out.push_str("  ");
        out.push_str(&"-".repeat(columns));
        out.push('\n');
    }

    for (row_index, row) in window.chunks(columns).enumerate() {
        let address = first_address.saturating_add((row_index * columns) as u64);
        let _ = write!(out, "{:0width$X}  ", address, width = address_width);
        for b in row {
            let _ = write!(out, "{:02X} ", b);
        }
        out.push(' ');
        if row.len() < columns {
            out.push_str(&" ".repeat(3 * (columns - row.len())));
        }
        for &b in row {
            out.push(if (32..127).contains(&b) { b as char } else { '.' });
        }
        out.push('\n');
    }

    out
}
