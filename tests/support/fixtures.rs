//! Test fixtures and constants.

use std::path::{Path, PathBuf};

/// A small Netscape-format cookie file, as a browser extension exports it.
pub const SAMPLE_COOKIES: &str = "\
# Netscape HTTP Cookie File
.youtube.com\tTRUE\t/\tTRUE\t1893456000\tSID\tabc123def456
.youtube.com\tTRUE\t/\tTRUE\t1893456000\tHSID\tqrs789tuv012
.google.com\tTRUE\t/\tFALSE\t1893456000\tNID\t511=xyz
";

/// Cookie content with non-ASCII values and blank lines.
pub const UNICODE_COOKIES: &str = "\
# Netscape HTTP Cookie File

.youtube.com\tTRUE\t/\tTRUE\t1893456000\tPREF\tf1=50000000&hl=日本語
.youtube.com\tTRUE\t/\tTRUE\t1893456000\tNAME\trésumé-браузер
";

/// Standard test logins used across multiple tests.
pub const STANDARD_LOGINS: &[(&str, &str)] = &[
    ("alice@example.com", "correct horse battery staple"),
    ("bob", "hunter2"),
    ("carol_dl", "p@ssw0rd!#$%"),
];

/// Write an executable shell script into `dir` and return its path.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, body).expect("failed to write script");
    let mut perms = std::fs::metadata(&path)
        .expect("failed to stat script")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("failed to chmod script");
    path
}

/// A fake downloader that accepts any login.
#[cfg(unix)]
pub fn passing_downloader(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "yt-dlp-pass",
        "#!/bin/sh\necho '[youtube] simulating download'\necho 'HOLT_LOGIN_OK'\nexit 0\n",
    )
}

/// A fake downloader that rejects every login.
#[cfg(unix)]
pub fn failing_downloader(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "yt-dlp-fail",
        "#!/bin/sh\necho 'ERROR: Incorrect username or password' >&2\nexit 1\n",
    )
}

/// A fake downloader that records its argv and login env vars, then succeeds.
///
/// Each invocation appends one `argv:` and one `env:` line to `log`.
#[cfg(unix)]
pub fn recording_downloader(dir: &Path, log: &Path) -> PathBuf {
    let body = format!(
        "#!/bin/sh\n\
         echo \"argv: $*\" >> '{log}'\n\
         echo \"env: ${{YTDLP_USERNAME:-unset}} ${{YTDLP_PASSWORD:-unset}}\" >> '{log}'\n\
         echo 'HOLT_LOGIN_OK'\n\
         exit 0\n",
        log = log.display()
    );
    write_script(dir, "yt-dlp-record", &body)
}
