//! Guarded primitive names and the guard statement text.
//!
//! Matching is by callee name only. A call is guarded when its callee is a
//! bare identifier spelled exactly like one of [`GUARDED_PRIMITIVES`];
//! qualified calls such as `syscall.Syscall(...)`, function values and
//! aliases are deliberately left alone.

use crate::text::contains_bytes;

/// Callee names whose call sites receive a guard.
pub const GUARDED_PRIMITIVES: [&str; 6] = [
    "Syscall",
    "Syscall6",
    "RawSyscall",
    "RawSyscall6",
    "SyscallNoError",
    "RawSyscallNoError",
];

/// Go builtin that aborts unconditionally.
pub const GUARD_CALL: &str = "panic";

/// Message prefix carried by every guard.
pub const GUARD_PREFIX: &str = "syscall not supported in wasm";

/// Text whose presence on the preceding line marks a site as guarded.
pub const GUARD_MARKER: &str = "panic(\"syscall not supported in wasm:";

/// Returns the canonical spelling of `name` if it is a guarded primitive.
#[must_use]
pub fn guarded_primitive(name: &[u8]) -> Option<&'static str> {
    GUARDED_PRIMITIVES
        .iter()
        .copied()
        .find(|primitive| primitive.as_bytes() == name)
}

/// Returns whether `line` already carries a guard.
#[must_use]
pub fn is_guard_line(line: &[u8]) -> bool {
    contains_bytes(line, GUARD_MARKER.as_bytes())
}

/// Builds `<indent>panic("<prefix>: <call>")`.
///
/// `call` is embedded in an interpreted string literal, so backslashes,
/// quotes and line breaks are escaped rather than copied raw; the panic
/// message still reads as the original call text. Raw embedding would put
/// the exact source slice in the guard but leave a file that no longer
/// parses whenever the call spans lines or carries a string argument.
#[must_use]
pub fn guard_line(indent: &[u8], call: &[u8]) -> Vec<u8> {
    let mut line = Vec::with_capacity(
        indent.len() + GUARD_CALL.len() + GUARD_PREFIX.len() + call.len() + 8,
    );
    line.extend_from_slice(indent);
    line.extend_from_slice(GUARD_CALL.as_bytes());
    line.extend_from_slice(b"(\"");
    line.extend_from_slice(GUARD_PREFIX.as_bytes());
    line.extend_from_slice(b": ");
    for &byte in call {
        match byte {
            b'\\' => line.extend_from_slice(b"\\\\"),
            b'"' => line.extend_from_slice(b"\\\""),
            b'\n' => line.extend_from_slice(b"\\n"),
            b'\r' => line.extend_from_slice(b"\\r"),
            other => line.push(other),
        }
    }
    line.extend_from_slice(b"\")");
    line
}
