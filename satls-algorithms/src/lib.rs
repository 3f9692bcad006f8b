pub mod satisfiability;
