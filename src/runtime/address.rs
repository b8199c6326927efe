use std::io;
use std::net::{IpAddr, UdpSocket};

/// Any routable address works; connecting a UDP socket sends nothing.
const PROBE_TARGET: &str = "8.8.8.8:80";

/// The address this host uses for outbound traffic, or the error text.
pub fn local_address() -> String {
    match outbound_ip() {
        Ok(ip) => ip.to_string(),
        Err(e) => format!("Error: {e}"),
    }
}

fn outbound_ip() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect(PROBE_TARGET)?;
    Ok(socket.local_addr()?.ip())
}
