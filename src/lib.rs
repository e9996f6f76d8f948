#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod ciclo;
pub mod error;
pub mod periodo;
pub mod plano;
pub mod quantity;
pub mod simulador;
pub mod time;
