#[cfg(target_os = "windows")]
use netifs::sys::InterfaceExt;
use netifs::{list_addresses, list_interfaces, Error, Interface};

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print every interface with its addresses.
    ListInterfaces,
    /// Print every assigned IP address, one per line.
    ListAddresses,
    /// Show a single interface looked up by name.
    Show { name: String },
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let args = Cli::parse();

    match args.command {
        Commands::ListAddresses => {
            for address in list_addresses()? {
                println!("{}", address);
            }
        }
        Commands::ListInterfaces => {
            for iface in list_interfaces()? {
                print_interface(&iface);
                println!();
            }
        }
        Commands::Show { name } => {
            print_interface(&Interface::try_from_name(&name)?);
        }
    }
    Ok(())
}

fn print_interface(iface: &Interface) {
    println!("Name: {}", iface.name());
    println!("Index: {}", iface.index());
    if iface.friendly_name() != iface.name() {
        println!("Friendly name: {}", iface.friendly_name());
    }
    cfg_if::cfg_if! {
        if #[cfg(target_os = "windows")] {
            println!("Description: {}", iface.description());
        }
    }
    println!("Flags: {:?}", iface.flags());
    if let Some(mac) = iface.hardware_address() {
        println!("Hardware address: {}", mac);
    }
    println!("MTU: {}", iface.mtu());
    for entry in iface.entries() {
        match entry.network() {
            Some(network) => println!("Address: {}", network),
            None => {
                if let Some(ip) = entry.ip() {
                    println!("Address: {}", ip);
                }
            }
        }
    }
}
