mod tests_reversibility;
