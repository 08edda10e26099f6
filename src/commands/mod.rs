pub type CmdResult<T> = treeswap::Result<(T, i32)>;

pub mod replace;
