// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Utils;
pub mod calc_api;
mod calc_api_tests;
pub mod calc_errors;
pub mod numerical;
pub mod somelinalg;
pub mod symbolic;
