use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub invoice: InvoiceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    /// Base URL of the mock REST store (json-server).
    #[serde(default = "default_store_url")]
    pub url: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: default_store_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InvoiceSettings {
    /// Session-wide discount percentage applied to previews until changed.
    #[serde(default = "default_discount_percentage")]
    pub default_discount_percentage: f64,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            default_discount_percentage: default_discount_percentage(),
        }
    }
}

impl InvoiceSettings {
    pub fn discount(&self) -> Decimal {
        Decimal::from_f64_retain(self.default_discount_percentage).unwrap_or(Decimal::from(5))
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9700
}

fn default_store_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_discount_percentage() -> f64 {
    5.0
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    // Works both from the workspace root and from inside invoice-manager.
    let configuration_directory = if base_path.ends_with("invoice-manager") {
        base_path.join("config")
    } else {
        base_path.join("invoice-manager").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
