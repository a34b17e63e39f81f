pub mod replay;

pub use replay::RouteReplaySampler;
