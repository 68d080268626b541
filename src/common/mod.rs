pub(crate) mod buf;
