#[derive(Debug, PartialEq)]
pub enum FindError {
    NotFound,
    Unknown,
}

impl From<mongodb::error::Error> for FindError {
    fn from(value: mongodb::error::Error) -> Self {
        log::error!("occurred an error in mongodb: {}", value);
        Self::Unknown
    }
}
