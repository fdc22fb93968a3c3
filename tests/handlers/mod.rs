mod contract_runner;
mod user_fixture;
