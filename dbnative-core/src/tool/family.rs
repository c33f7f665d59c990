//! Conventions of a native tool family.

use std::path::Path;

/// How a family of native tools accepts credentials.
///
/// Every tool in a family (`mysqldump`, `mysql`, `mysqlimport`, ...) reads
/// the same option file format, honours the same `--defaults-file` option and
/// looks up the same password environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolFamily {
    /// Family name used in logs
    pub name: &'static str,
    /// Temp folder namespace that holds this family's credential files
    pub temp_namespace: &'static str,
    /// Section header written as the first line of a credential file
    pub credential_section: &'static str,
    /// File name prefix for credential files
    pub credential_file_prefix: &'static str,
    /// File name suffix for credential files
    pub credential_file_suffix: &'static str,
    /// Option pointing the tool at a credential file
    pub defaults_file_option: &'static str,
    /// Flag preceding the user name when credentials are passed inline
    pub user_flag: &'static str,
    /// Environment variable the tool reads its password from
    pub password_env_var: &'static str,
}

impl ToolFamily {
    /// MySQL and MariaDB client tools.
    pub const MYSQL: Self = Self {
        name: "mysql",
        temp_namespace: "mysql-native-handler",
        credential_section: "client",
        credential_file_prefix: ".my-",
        credential_file_suffix: ".cnf",
        defaults_file_option: "--defaults-file",
        user_flag: "-u",
        password_env_var: "MYSQL_PWD",
    };

    /// Renders the `--defaults-file=<path>` token for a credential file.
    pub fn defaults_file_arg(&self, path: &Path) -> String {
        format!("{}={}", self.defaults_file_option, path.display())
    }

    /// Renders the exact credential file contents for a user/password pair.
    ///
    /// Values are written verbatim and the file has no trailing newline.
    pub fn credential_file_contents(&self, username: &str, password: &str) -> String {
        format!(
            "[{}]\nuser={}\npassword={}",
            self.credential_section, username, password
        )
    }
}

impl Default for ToolFamily {
    fn default() -> Self {
        Self::MYSQL
    }
}
