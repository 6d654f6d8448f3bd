mod tests_fixers;
mod tests_round_trip;
