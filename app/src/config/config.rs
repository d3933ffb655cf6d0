use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_server_ip")]
    pub server_ip: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Shared secret of the identity service that issues bearer tokens.
    pub jwt_secret: String,

    #[serde(default = "default_desk_page_size")]
    pub desk_page_size: u64,
    #[serde(default = "default_employee_page_size")]
    pub employee_page_size: u64,

    #[serde(default = "default_floors_file")]
    pub floors_file: String,
    #[serde(default = "default_diagrams_dir")]
    pub diagrams_dir: String,
}

fn default_port() -> u16 {
    8000
}
fn default_server_ip() -> String {
    "127.0.0.1".to_string()
}
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    2
}
fn default_desk_page_size() -> u64 {
    20
}
fn default_employee_page_size() -> u64 {
    25
}
fn default_floors_file() -> String {
    "floors.yaml".to_string()
}
fn default_diagrams_dir() -> String {
    "diagrams".to_string()
}

impl Config {
    pub fn load_envs() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let vars = vec![
            ("DATABASE_URL".to_string(), "sqlite::memory:".to_string()),
            ("JWT_SECRET".to_string(), "secret".to_string()),
            ("EMPLOYEE_PAGE_SIZE".to_string(), "50".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.desk_page_size, 20);
        assert_eq!(config.employee_page_size, 50);
        assert_eq!(config.floors_file, "floors.yaml");
    }
}
