pub(crate) use anyhow::Context;
pub(crate) use anyhow::Result;
