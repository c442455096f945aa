pub mod common;


#[cfg(test)]
mod test_multi_attacks;




#[cfg(test)]
mod test_determinism;
