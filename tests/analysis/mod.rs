mod tests_binding;
mod tests_descriptors;
mod tests_imports;
