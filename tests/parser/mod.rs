mod tests_dialects;
mod tests_fixtures;
mod tests_properties;
mod tests_recovery;
mod tests_scenarios;
