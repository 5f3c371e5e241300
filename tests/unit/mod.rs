mod common;
mod login_flow;
mod logout_flow;
mod route_guards;
