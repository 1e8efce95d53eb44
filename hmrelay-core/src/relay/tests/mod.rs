mod support;
mod units;
