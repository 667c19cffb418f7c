use crate::Error;
use libc::NLM_F_MULTI;
use log::{debug, warn};
use netlink_packet_route::{
    AddressMessage, LinkMessage, NetlinkHeader, NetlinkMessage, NetlinkPayload, RtnlMessage,
    NLM_F_DUMP, NLM_F_REQUEST,
};
use netlink_sys::constants::NETLINK_ROUTE;
use netlink_sys::{Socket, SocketAddr};

/// Sends one RTM_GET* request with NLM_F_DUMP set and collects every inner
/// message of the (possibly multipart) reply.
fn dump(request: RtnlMessage) -> Result<Vec<RtnlMessage>, Error> {
    let mut socket = Socket::new(NETLINK_ROUTE)?;
    socket.bind_auto()?;
    socket.connect(&SocketAddr::new(0, 0))?;

    let mut req = NetlinkMessage {
        header: NetlinkHeader {
            flags: NLM_F_DUMP | NLM_F_REQUEST,
            ..Default::default()
        },
        payload: NetlinkPayload::from(request),
    };

    req.finalize();

    let mut buf = vec![0; req.header.length as usize];
    req.serialize(&mut buf[..]);

    debug!(">>> {:?}", req);
    socket.send(&buf[..], 0)?;

    let mut replies = vec![];
    // Dump chunks can be far larger than a page; iproute2 sizes its receive
    // buffer the same way.
    let mut receive_buffer = vec![0; 32768];
    let mut offset = 0;

    'outer: loop {
        let size = socket.recv(&mut &mut receive_buffer[..], 0)?;

        loop {
            let bytes = &receive_buffer[offset..];
            let msg: NetlinkMessage<RtnlMessage> = match NetlinkMessage::deserialize(bytes) {
                Ok(msg) => msg,
                Err(e) => {
                    warn!("undecodable netlink message: {:?}", e);
                    return Err(Error::UnexpectedMetadata);
                }
            };

            match msg.payload {
                NetlinkPayload::Done => break 'outer,
                NetlinkPayload::InnerMessage(reply) => replies.push(reply),
                NetlinkPayload::Error(err) => {
                    warn!("netlink error message: {:?}", err);
                    return Err(Error::Io(std::io::Error::from_raw_os_error(-err.code)));
                }
                _ => {
                    warn!("unexpected message: {:?}", msg.header);
                }
            }

            // Got non-multipart message
            if (msg.header.flags & (NLM_F_MULTI as u16)) == 0 {
                break 'outer;
            }

            offset += msg.header.length as usize;
            if offset == size || msg.header.length == 0 {
                offset = 0;
                break;
            }
        }
    }
    Ok(replies)
}

pub(super) fn dump_links() -> Result<Vec<LinkMessage>, Error> {
    let replies = dump(RtnlMessage::GetLink(LinkMessage::default()))?;
    Ok(replies
        .into_iter()
        .filter_map(|reply| match reply {
            RtnlMessage::NewLink(link) => Some(link),
            other => {
                warn!("unexpected reply to a link dump: {:?}", other);
                None
            }
        })
        .collect())
}

pub(super) fn dump_addresses() -> Result<Vec<AddressMessage>, Error> {
    let replies = dump(RtnlMessage::GetAddress(AddressMessage::default()))?;
    Ok(replies
        .into_iter()
        .filter_map(|reply| match reply {
            RtnlMessage::NewAddress(address) => Some(address),
            other => {
                warn!("unexpected reply to an address dump: {:?}", other);
                None
            }
        })
        .collect())
}
