/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Client library for the college admission guidance backend.
//!
//! - [`session`]: persisted tokens and user record, sign-out
//! - [`application::services`]: typed wrappers over the REST routes
//! - [`presentation`]: navigation rendering and the logout flow

pub mod config;

pub mod constants;

pub mod error;

pub mod application;

pub mod presentation;

pub mod session;

pub mod storage;

pub mod transport;

pub mod utils;
