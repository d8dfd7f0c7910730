//! Quotes matching the validator's rounding

use anyhow::{anyhow, Result};
use colored::Colorize;
use swap_model::{quote_add_liquidity, quote_remove_liquidity, quote_swap_input, quote_swap_output};
use udtswap_common::ProtocolConfig;

pub fn swap_command(
    config: &ProtocolConfig,
    in_reserve: u128,
    out_reserve: u128,
    amount_in: Option<u128>,
    amount_out: Option<u128>,
) -> Result<()> {
    println!("{}", "=== Swap Quote ===".bright_green().bold());
    println!("{} {} in / {} out", "Reserves:".bright_cyan(), in_reserve, out_reserve);
    println!("{} {}/1000", "Fee retained:".bright_cyan(), config.fee_numerator);

    match (amount_in, amount_out) {
        (Some(amount_in), None) => {
            let out = quote_swap_output(in_reserve, out_reserve, amount_in, config.fee())
                .map_err(|err| anyhow!("Cannot quote swap: {:?}", err))?;
            println!("{} {}", "Pay:".bright_cyan(), amount_in);
            println!("{} {}", "Receive:".bright_cyan(), out.to_string().bright_green());
        }
        (None, Some(amount_out)) => {
            let pay = quote_swap_input(in_reserve, out_reserve, amount_out, config.fee())
                .map_err(|err| anyhow!("Cannot quote swap: {:?}", err))?;
            println!("{} {}", "Pay:".bright_cyan(), pay.to_string().bright_green());
            println!("{} {}", "Receive:".bright_cyan(), amount_out);
        }
        _ => anyhow::bail!("Give exactly one of --amount-in or --amount-out"),
    }
    Ok(())
}

pub fn add_command(reserve_a: u128, reserve_b: u128, liquidity: u128, amount_a: u128) -> Result<()> {
    let quote = quote_add_liquidity(reserve_a, reserve_b, liquidity, amount_a)
        .map_err(|err| anyhow!("Cannot quote deposit: {:?}", err))?;

    println!("{}", "=== Add Liquidity Quote ===".bright_green().bold());
    println!("{} {}", "Deposit A:".bright_cyan(), amount_a);
    match quote.amount_b {
        Some(amount_b) => println!("{} {}", "Deposit B:".bright_cyan(), amount_b.to_string().bright_green()),
        None => println!("{} {}", "Deposit B:".bright_cyan(), "any positive amount (first deposit)".yellow()),
    }
    println!("{} {}", "Minted:".bright_cyan(), quote.minted.to_string().bright_green());
    Ok(())
}

pub fn remove_command(reserve_a: u128, reserve_b: u128, liquidity: u128, burned: u128) -> Result<()> {
    let quote = quote_remove_liquidity(reserve_a, reserve_b, liquidity, burned)
        .map_err(|err| anyhow!("Cannot quote withdrawal: {:?}", err))?;

    println!("{}", "=== Remove Liquidity Quote ===".bright_green().bold());
    println!("{} {}", "Burned:".bright_cyan(), burned);
    println!("{} {}", "Receive A:".bright_cyan(), quote.amount_a.to_string().bright_green());
    println!("{} {}", "Receive B:".bright_cyan(), quote.amount_b.to_string().bright_green());
    Ok(())
}
