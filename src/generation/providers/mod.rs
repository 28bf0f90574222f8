pub mod trpc;

pub use trpc::TrpcProvider;
