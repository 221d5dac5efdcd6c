//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::path::Path;
use std::process::Output;

impl Test {
    /// Create a holt command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME (and USERPROFILE) set to the temporary home directory
    /// - XDG dirs pinned under the temporary home
    /// - the file-backed store selected, so no OS keychain prompts fire
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("holt").expect("failed to find holt binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("XDG_DATA_HOME", self.home.path().join(".local/share"));
        cmd.env("HOLT_STORE", "fs");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("HOLT_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run holt with arbitrary arguments.
    pub fn holt(&self, args: &[&str]) -> Output {
        self.cmd().args(args).output().expect("failed to run holt")
    }

    /// Shortcut for `holt login set`, feeding the password over stdin.
    pub fn login_set(&self, account: Option<&str>, username: &str, password: &str) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["login", "set"]);
        if let Some(account) = account {
            cmd.args(["--account", account]);
        }
        cmd.args(["--username", username])
            .write_stdin(format!("{password}\n"))
            .output()
            .expect("failed to run holt login set")
    }

    /// Shortcut for `holt login show` command.
    pub fn login_show(&self, account: Option<&str>) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["login", "show"]);
        if let Some(account) = account {
            cmd.args(["--account", account]);
        }
        cmd.output().expect("failed to run holt login show")
    }

    /// Shortcut for `holt login rm` command.
    pub fn login_rm(&self, account: Option<&str>) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["login", "rm"]);
        if let Some(account) = account {
            cmd.args(["--account", account]);
        }
        cmd.output().expect("failed to run holt login rm")
    }

    /// Shortcut for `holt login test` against a given downloader binary.
    ///
    /// Runs unattended (`--yes`) so presence checks auto-approve.
    pub fn login_test(&self, username: &str, password: &str, downloader: &Path) -> Output {
        self.write_config(&format!(
            "[downloader]\nbinary = \"{}\"\n",
            downloader.display()
        ));
        self.cmd()
            .args(["--yes", "login", "test", "--username", username])
            .write_stdin(format!("{password}\n"))
            .output()
            .expect("failed to run holt login test")
    }

    /// Shortcut for `holt cookies import` command.
    pub fn cookies_import(&self, path: &Path) -> Output {
        self.cmd()
            .args(["--yes", "cookies", "import"])
            .arg(path)
            .output()
            .expect("failed to run holt cookies import")
    }

    /// Shortcut for `holt cookies export` command.
    pub fn cookies_export(&self, path: &Path) -> Output {
        self.cmd()
            .args(["--yes", "cookies", "export"])
            .arg(path)
            .output()
            .expect("failed to run holt cookies export")
    }

    /// Shortcut for `holt cookies rm` command.
    pub fn cookies_rm(&self) -> Output {
        self.holt(&["cookies", "rm"])
    }

    /// Shortcut for `holt cookies reset` command.
    pub fn cookies_reset(&self) -> Output {
        self.holt(&["cookies", "reset"])
    }

    /// Shortcut for `holt status` command.
    pub fn status(&self) -> Output {
        self.holt(&["status"])
    }

    /// Shortcut for `holt download` with a configured downloader binary.
    pub fn download(&self, url: &str, downloader: &Path) -> Output {
        self.write_config(&format!(
            "[downloader]\nbinary = \"{}\"\n",
            downloader.display()
        ));
        self.cmd()
            .args(["--yes", "download", url])
            .output()
            .expect("failed to run holt download")
    }
}
