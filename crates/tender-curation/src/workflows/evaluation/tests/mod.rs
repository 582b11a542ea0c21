mod common;

mod extractors;
