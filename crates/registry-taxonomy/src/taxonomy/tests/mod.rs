mod common;
mod profession;
mod qualification;
