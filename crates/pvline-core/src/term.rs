//! Terminal size probe.

use std::io::IsTerminal;

#[cfg(unix)]
use std::os::unix::io::AsRawFd;

/// Width and height of the terminal on stderr, or `None` when stderr is not
/// a terminal or the size cannot be read.
pub fn screen_size() -> Option<(usize, usize)> {
    let stderr = std::io::stderr();
    if !stderr.is_terminal() {
        return None;
    }
    probe(&stderr)
}

#[cfg(unix)]
fn probe(stderr: &std::io::Stderr) -> Option<(usize, usize)> {
    let fd = stderr.as_raw_fd();
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let r = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };
    if r != 0 {
        tracing::debug!(
            errno = std::io::Error::last_os_error().raw_os_error(),
            "TIOCGWINSZ failed"
        );
        return None;
    }
    sanitize(ws.ws_col, ws.ws_row)
}

#[cfg(not(unix))]
fn probe(_stderr: &std::io::Stderr) -> Option<(usize, usize)> {
    None
}

/// Some terminals report 0x0 before they are fully set up.
fn sanitize(cols: u16, rows: u16) -> Option<(usize, usize)> {
    if cols == 0 || rows == 0 {
        return None;
    }
    Some((usize::from(cols), usize::from(rows)))
}
