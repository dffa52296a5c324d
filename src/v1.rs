pub mod twosum;
