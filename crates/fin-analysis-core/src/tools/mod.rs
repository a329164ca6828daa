pub mod catalog;
pub mod protocol;

pub use catalog::{call_tool, list_tools, ToolDescriptor};
pub use protocol::{dispatch, handle_message, respond, RpcRequest, RpcResponse};
