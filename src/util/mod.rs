mod body;
mod content_type;
mod object_bytes_stream;
mod requested_key;

pub use self::body::*;
pub use self::content_type::*;
pub use self::object_bytes_stream::*;
pub use self::requested_key::*;
