pub mod socket_addr {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use std::net::SocketAddr;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SocketAddr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value
            .parse::<SocketAddr>()
            .map_err(|err| D::Error::custom(format!("'{}' is not a socket address: {}", value, err)))
    }
}

pub mod non_empty {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        if value.trim().is_empty() {
            Err(D::Error::custom("value must not be empty"))
        } else {
            Ok(value)
        }
    }
}
