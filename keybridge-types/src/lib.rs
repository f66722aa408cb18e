//! # keybridge types
//!
//! This crate provides the fundamental type definitions shared by keybridge
//! components.
//!
//! ## Modules
//!
//! - [`action`] - Key actions emitted by the interpreter and their release policies
//! - [`keycode`] - HID keycodes and the en-US ASCII keymap
//! - [`modifier`] - The modifier byte of a HID keyboard report

#![no_std]

pub mod action;
pub mod keycode;
pub mod modifier;
